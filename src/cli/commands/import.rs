//! Import command implementation.
//!
//! Copies a JSON task snapshot into the SQLite store.

use std::path::Path;

use crate::cli::args::OutputFormat;
use crate::error::TaskpulseError;
use crate::output::format_import;
use crate::storage::Database;
use crate::tasks::{JsonTaskFile, TaskSource};

/// Execute the import command
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, the database
/// cannot be written, or output formatting fails.
pub fn import(file: &Path, database: &Path, format: OutputFormat) -> Result<String, TaskpulseError> {
    let tasks = JsonTaskFile::new(file).get_all_tasks()?;

    if let Some(parent) = database.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut db = Database::open_at(database)?;
    let imported = db.import_tasks(&tasks)?;
    format_import(imported, database, format)
}
