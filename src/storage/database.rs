//! `SQLite` task store.
//!
//! The database lives at `~/.taskpulse/taskpulse.db` and holds:
//! - `tasks`: one row per task, timestamps as local ISO 8601 text
//! - `task_tags`: tag membership
//!
//! The analytics engine reads it through [`TaskSource`]; only the import
//! command writes.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use chrono::NaiveDateTime;
use rusqlite::{params, Connection};
use tracing::{info, warn};

use super::migrations;
use crate::error::TaskpulseError;
use crate::tasks::{Priority, TaskSnapshot, TaskSource, TaskStatus};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at a specific path, creating it if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_at(path: &Path) -> Result<Self, TaskpulseError> {
        let conn = Connection::open(path).map_err(|e| {
            TaskpulseError::Database(format!("Failed to open database {}: {e}", path.display()))
        })?;
        Self::init(conn)
    }

    /// Open an in-memory database (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_in_memory() -> Result<Self, TaskpulseError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            TaskpulseError::Database(format!("Failed to open in-memory database: {e}"))
        })?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, TaskpulseError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|e| TaskpulseError::Database(format!("Failed to enable foreign keys: {e}")))?;
        migrations::run(&conn)?;
        Ok(Self { conn })
    }

    /// Get the current schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, TaskpulseError> {
        migrations::get_version(&self.conn)
    }

    /// Insert or replace a task and its tags.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn upsert_task(&mut self, task: &TaskSnapshot) -> Result<(), TaskpulseError> {
        let tx = self
            .conn
            .transaction()
            .map_err(|e| TaskpulseError::Database(format!("Failed to begin transaction: {e}")))?;

        tx.execute(
            "INSERT OR REPLACE INTO tasks
                (id, title, status, priority, project_id, created_at, completed_at, actual_duration)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                task.id,
                task.title,
                task.status.as_str(),
                task.priority.label(),
                task.project_id,
                task.created_at.format(TIMESTAMP_FORMAT).to_string(),
                task.completed_at
                    .map(|t| t.format(TIMESTAMP_FORMAT).to_string()),
                task.actual_duration,
            ],
        )
        .map_err(|e| TaskpulseError::Database(format!("Failed to write task {}: {e}", task.id)))?;

        tx.execute("DELETE FROM task_tags WHERE task_id = ?1", params![task.id])
            .map_err(|e| TaskpulseError::Database(format!("Failed to clear tags: {e}")))?;

        for tag in &task.tags {
            tx.execute(
                "INSERT INTO task_tags (task_id, tag) VALUES (?1, ?2)",
                params![task.id, tag],
            )
            .map_err(|e| TaskpulseError::Database(format!("Failed to write tag {tag}: {e}")))?;
        }

        tx.commit()
            .map_err(|e| TaskpulseError::Database(format!("Failed to commit task: {e}")))
    }

    /// Insert or replace many tasks. Returns the number written.
    ///
    /// # Errors
    ///
    /// Returns an error on the first failed write.
    pub fn import_tasks(&mut self, tasks: &[TaskSnapshot]) -> Result<usize, TaskpulseError> {
        for task in tasks {
            self.upsert_task(task)?;
        }
        info!(count = tasks.len(), "imported tasks");
        Ok(tasks.len())
    }

    /// Read every task with its tags.
    ///
    /// Rows with unreadable status or timestamps are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn fetch_all_tasks(&self) -> Result<Vec<TaskSnapshot>, TaskpulseError> {
        let mut tags = self.fetch_tags()?;

        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, title, status, priority, project_id, created_at, completed_at, actual_duration
                 FROM tasks ORDER BY created_at, id",
            )
            .map_err(|e| TaskpulseError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(TaskRow {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    status: row.get(2)?,
                    priority: row.get(3)?,
                    project_id: row.get(4)?,
                    created_at: row.get(5)?,
                    completed_at: row.get(6)?,
                    actual_duration: row.get(7)?,
                })
            })
            .map_err(|e| TaskpulseError::Database(format!("Failed to query tasks: {e}")))?;

        let mut tasks = Vec::new();
        for row in rows {
            let row = row.map_err(|e| TaskpulseError::Database(format!("Failed to read row: {e}")))?;
            let id = row.id.clone();
            match row.into_snapshot(tags.remove(&id).unwrap_or_default()) {
                Some(task) => tasks.push(task),
                None => warn!(task_id = %id, "skipping unreadable task row"),
            }
        }

        Ok(tasks)
    }

    fn fetch_tags(&self) -> Result<HashMap<String, BTreeSet<String>>, TaskpulseError> {
        let mut stmt = self
            .conn
            .prepare("SELECT task_id, tag FROM task_tags")
            .map_err(|e| TaskpulseError::Database(format!("Failed to prepare query: {e}")))?;

        let pairs = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))
            .map_err(|e| TaskpulseError::Database(format!("Failed to query tags: {e}")))?;

        let mut tags: HashMap<String, BTreeSet<String>> = HashMap::new();
        for pair in pairs {
            let (task_id, tag) =
                pair.map_err(|e| TaskpulseError::Database(format!("Failed to read tag: {e}")))?;
            tags.entry(task_id).or_default().insert(tag);
        }
        Ok(tags)
    }

    /// Number of stored tasks.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn task_count(&self) -> Result<usize, TaskpulseError> {
        self.conn
            .query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0))
            .map_err(|e| TaskpulseError::Database(format!("Failed to count tasks: {e}")))
    }
}

impl TaskSource for Database {
    fn get_all_tasks(&self) -> Result<Vec<TaskSnapshot>, TaskpulseError> {
        self.fetch_all_tasks()
    }
}

struct TaskRow {
    id: String,
    title: String,
    status: String,
    priority: String,
    project_id: Option<String>,
    created_at: String,
    completed_at: Option<String>,
    actual_duration: Option<f64>,
}

impl TaskRow {
    fn into_snapshot(self, tags: BTreeSet<String>) -> Option<TaskSnapshot> {
        let completed_at = match self.completed_at {
            Some(text) => Some(parse_timestamp(&text)?),
            None => None,
        };

        Some(TaskSnapshot {
            id: self.id,
            title: self.title,
            status: TaskStatus::parse(&self.status)?,
            priority: Priority::parse(&self.priority).unwrap_or_default(),
            tags,
            project_id: self.project_id,
            created_at: parse_timestamp(&self.created_at)?,
            completed_at,
            actual_duration: self.actual_duration,
        })
    }
}

fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S"))
        .ok()
}
