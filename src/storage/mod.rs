//! Storage layer for taskpulse.
//!
//! Provides a SQLite-backed task store usable as a task source.

mod database;
mod migrations;

pub use database::Database;
