//! Task sources feeding the analytics engine.
//!
//! A source hands out a complete, consistent snapshot of every task. The
//! engine calls it once per operation and never writes back.

use std::path::{Path, PathBuf};

use tracing::info;

use super::types::TaskSnapshot;
use crate::error::TaskpulseError;

/// Provider of task snapshots.
#[cfg_attr(test, mockall::automock)]
pub trait TaskSource {
    /// Return every known task.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be read.
    fn get_all_tasks(&self) -> Result<Vec<TaskSnapshot>, TaskpulseError>;
}

impl TaskSource for Vec<TaskSnapshot> {
    fn get_all_tasks(&self) -> Result<Vec<TaskSnapshot>, TaskpulseError> {
        Ok(self.clone())
    }
}

impl<S: TaskSource + ?Sized> TaskSource for &S {
    fn get_all_tasks(&self) -> Result<Vec<TaskSnapshot>, TaskpulseError> {
        (**self).get_all_tasks()
    }
}

impl<S: TaskSource + ?Sized> TaskSource for Box<S> {
    fn get_all_tasks(&self) -> Result<Vec<TaskSnapshot>, TaskpulseError> {
        (**self).get_all_tasks()
    }
}

/// Tasks stored as a JSON array in a file.
#[derive(Debug, Clone)]
pub struct JsonTaskFile {
    path: PathBuf,
}

impl JsonTaskFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TaskSource for JsonTaskFile {
    fn get_all_tasks(&self) -> Result<Vec<TaskSnapshot>, TaskpulseError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|e| {
            TaskpulseError::Source(format!(
                "Failed to read task file {}: {e}",
                self.path.display()
            ))
        })?;

        let tasks: Vec<TaskSnapshot> = serde_json::from_str(&contents).map_err(|e| {
            TaskpulseError::Source(format!(
                "Failed to parse task file {}: {e}",
                self.path.display()
            ))
        })?;

        info!(path = %self.path.display(), count = tasks.len(), "loaded task snapshot");
        Ok(tasks)
    }
}
