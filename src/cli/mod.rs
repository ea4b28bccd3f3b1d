//! Command-line interface for taskpulse.

pub mod args;
pub mod commands;
