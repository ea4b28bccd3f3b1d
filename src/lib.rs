//! taskpulse - productivity analytics for task history
//!
//! This crate computes summaries, completion streaks, tag categories,
//! time-of-day histograms and completion-rate trends from a snapshot of
//! tasks, and ships a command-line interface that renders them.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod analytics;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod storage;
pub mod tasks;

pub use analytics::{AnalyticsEngine, AnalyticsTimePeriod, DateRange};
pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::TaskpulseError;
pub use tasks::{JsonTaskFile, Priority, TaskSnapshot, TaskSource, TaskStatus};
