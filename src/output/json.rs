//! JSON output formatting for taskpulse.
//!
//! Range-based results are wrapped with the resolved bounds so scripts can
//! tell which window a number belongs to.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use serde_json::json;

use crate::analytics::{
    peak_bucket, weekday_name, AnalyticsSummary, AnalyticsTimePeriod, CategoryAnalytics,
    DailyStats, DateRange,
};
use crate::error::TaskpulseError;

/// Format a period summary as JSON
///
/// # Errors
///
/// Returns `TaskpulseError::Parse` if JSON serialization fails.
pub fn format_summary_json(
    summary: &AnalyticsSummary,
    period: &AnalyticsTimePeriod,
) -> Result<String, TaskpulseError> {
    let output = json!({
        "period": period.as_str(),
        "summary": summary
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format categories as JSON
///
/// # Errors
///
/// Returns `TaskpulseError::Parse` if JSON serialization fails.
pub fn format_categories_json(
    categories: &[CategoryAnalytics],
    range: &DateRange,
) -> Result<String, TaskpulseError> {
    let output = json!({
        "range": range,
        "count": categories.len(),
        "items": categories
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format per-day statistics as JSON
///
/// # Errors
///
/// Returns `TaskpulseError::Parse` if JSON serialization fails.
pub fn format_daily_json(days: &[DailyStats], range: &DateRange) -> Result<String, TaskpulseError> {
    let output = json!({
        "range": range,
        "count": days.len(),
        "items": days
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format the hour-of-day histogram as JSON
///
/// # Errors
///
/// Returns `TaskpulseError::Parse` if JSON serialization fails.
pub fn format_hourly_json(
    hours: &BTreeMap<u32, usize>,
    range: &DateRange,
) -> Result<String, TaskpulseError> {
    let output = json!({
        "range": range,
        "hours": hours,
        "peakHour": peak_bucket(hours)
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format the weekday histogram as JSON
///
/// # Errors
///
/// Returns `TaskpulseError::Parse` if JSON serialization fails.
pub fn format_weekday_json(
    weekdays: &BTreeMap<u32, usize>,
    range: &DateRange,
) -> Result<String, TaskpulseError> {
    let output = json!({
        "range": range,
        "weekdays": weekdays,
        "peakWeekday": peak_bucket(weekdays).map(weekday_name)
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a completion-rate trend as JSON
///
/// # Errors
///
/// Returns `TaskpulseError::Parse` if JSON serialization fails.
pub fn format_trend_json(
    rates: &[f64],
    range: &DateRange,
    interval_days: i64,
) -> Result<String, TaskpulseError> {
    let output = json!({
        "range": range,
        "intervalDays": interval_days,
        "rates": rates
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format an import result as JSON
///
/// # Errors
///
/// Returns `TaskpulseError::Parse` if JSON serialization fails.
pub fn format_import_json(imported: usize, database: &Path) -> Result<String, TaskpulseError> {
    let output = json!({
        "imported": imported,
        "database": database.display().to_string()
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `TaskpulseError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, TaskpulseError> {
    Ok(serde_json::to_string_pretty(value)?)
}
