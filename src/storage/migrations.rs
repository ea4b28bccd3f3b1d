//! Database migrations for taskpulse.
//!
//! Each migration upgrades the schema by one version. Migrations are run
//! automatically when the database is opened.

use rusqlite::Connection;

use crate::error::TaskpulseError;

/// Current schema version.
pub const CURRENT_VERSION: i32 = 2;

/// Get the current schema version from the database.
///
/// Returns 0 if no version has been set (new database).
pub fn get_version(conn: &Connection) -> Result<i32, TaskpulseError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| TaskpulseError::Database(format!("Failed to get schema version: {e}")))
}

fn set_version(conn: &Connection, version: i32) -> Result<(), TaskpulseError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| TaskpulseError::Database(format!("Failed to set schema version: {e}")))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), TaskpulseError> {
    let current = get_version(conn)?;

    if current >= CURRENT_VERSION {
        return Ok(());
    }

    for version in (current + 1)..=CURRENT_VERSION {
        run_migration(conn, version)?;
        set_version(conn, version)?;
    }

    Ok(())
}

fn run_migration(conn: &Connection, version: i32) -> Result<(), TaskpulseError> {
    match version {
        1 => migrate_v1(conn),
        2 => migrate_v2(conn),
        _ => Err(TaskpulseError::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: tasks and their tags.
fn migrate_v1(conn: &Connection) -> Result<(), TaskpulseError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS tasks (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL DEFAULT '',
            status TEXT NOT NULL DEFAULT 'pending',
            priority TEXT NOT NULL DEFAULT 'medium',
            project_id TEXT,
            created_at TEXT NOT NULL,
            completed_at TEXT,
            actual_duration REAL
        );

        CREATE TABLE IF NOT EXISTS task_tags (
            task_id TEXT NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
            tag TEXT NOT NULL,
            PRIMARY KEY (task_id, tag)
        );
        ",
    )
    .map_err(|e| TaskpulseError::Database(format!("Migration v1 failed: {e}")))
}

/// Migration v2: indexes for time-based lookups.
fn migrate_v2(conn: &Connection) -> Result<(), TaskpulseError> {
    conn.execute_batch(
        r"
        CREATE INDEX IF NOT EXISTS idx_tasks_created_at ON tasks(created_at);
        CREATE INDEX IF NOT EXISTS idx_tasks_completed_at ON tasks(completed_at);
        CREATE INDEX IF NOT EXISTS idx_task_tags_tag ON task_tags(tag);
        ",
    )
    .map_err(|e| TaskpulseError::Database(format!("Migration v2 failed: {e}")))
}
