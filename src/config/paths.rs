//! Path resolution for taskpulse configuration and data files.
//!
//! All taskpulse data is stored in `~/.taskpulse/` (or `$TASKPULSE_HOME`):
//! - `config.yaml` - Main configuration file
//! - `taskpulse.db` - SQLite task store
//! - `tasks.json` - Default JSON task snapshot

use std::path::PathBuf;

use crate::error::TaskpulseError;

/// Environment variable overriding the data root.
pub const HOME_ENV: &str = "TASKPULSE_HOME";

/// Paths to taskpulse configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.taskpulse/`
    pub root: PathBuf,
    /// Config file: `~/.taskpulse/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.taskpulse/taskpulse.db`
    pub database: PathBuf,
    /// JSON snapshot: `~/.taskpulse/tasks.json`
    pub tasks_file: PathBuf,
}

impl Paths {
    /// Create paths from `$TASKPULSE_HOME`, falling back to `~/.taskpulse`.
    ///
    /// # Errors
    ///
    /// Returns an error if neither variable is set.
    pub fn new() -> Result<Self, TaskpulseError> {
        if let Some(root) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var("HOME").map_err(|_| {
            TaskpulseError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".taskpulse")))
    }

    /// Create paths with a custom root directory.
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("taskpulse.db"),
            tasks_file: root.join("tasks.json"),
            root,
        }
    }

    /// Ensure the root directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), TaskpulseError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                TaskpulseError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }
        Ok(())
    }
}
