//! Error types for taskpulse.

use chrono::NaiveDateTime;
use thiserror::Error;

/// All errors produced by the taskpulse library.
#[derive(Debug, Error)]
pub enum TaskpulseError {
    /// A custom range whose start lies after its end.
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    /// A calendar boundary outside the representable dates.
    #[error("date out of range: {0}")]
    DateOutOfRange(String),

    /// A trend interval shorter than one day.
    #[error("invalid trend interval: {0} days (must be at least 1)")]
    InvalidInterval(i64),

    /// Configuration could not be loaded or saved.
    #[error("configuration error: {0}")]
    Config(String),

    /// SQLite task store failure.
    #[error("database error: {0}")]
    Database(String),

    /// The task source could not produce a snapshot.
    #[error("task source error: {0}")]
    Source(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_invalid_range_message() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let err = TaskpulseError::InvalidRange { start, end };
        assert!(err.to_string().contains("2024-03-02 00:00:00"));
    }

    #[test]
    fn test_source_error_message() {
        let err = TaskpulseError::Source("offline".to_string());
        assert_eq!(err.to_string(), "task source error: offline");
    }
}
