//! Command implementations for taskpulse.
//!
//! This module contains the implementation of all CLI commands.

mod analytics;
mod import;

pub use analytics::{categories, daily, hourly, productivity, streak, summary, trend, weekday};
pub use import::import;
