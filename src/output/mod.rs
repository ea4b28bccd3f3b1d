//! Output formatting for taskpulse.
//!
//! This module renders analytics results as colored text or JSON.

mod json;
mod pretty;

use std::collections::BTreeMap;
use std::path::Path;

use crate::analytics::{
    AnalyticsSummary, AnalyticsTimePeriod, CategoryAnalytics, DailyStats, DateRange,
    ProductivityMetrics, StreakInfo,
};
use crate::cli::args::OutputFormat;
use crate::error::TaskpulseError;

pub use json::*;
pub use pretty::*;

/// Format a period summary based on output format
///
/// # Errors
///
/// Returns `TaskpulseError::Parse` if JSON serialization fails.
pub fn format_summary(
    summary: &AnalyticsSummary,
    period: &AnalyticsTimePeriod,
    format: OutputFormat,
) -> Result<String, TaskpulseError> {
    match format {
        OutputFormat::Pretty => Ok(format_summary_pretty(summary, period)),
        OutputFormat::Json => format_summary_json(summary, period),
    }
}

/// Format productivity metrics based on output format
///
/// # Errors
///
/// Returns `TaskpulseError::Parse` if JSON serialization fails.
pub fn format_productivity(
    metrics: &ProductivityMetrics,
    format: OutputFormat,
) -> Result<String, TaskpulseError> {
    match format {
        OutputFormat::Pretty => Ok(format_productivity_pretty(metrics)),
        OutputFormat::Json => to_json(metrics),
    }
}

/// Format streak information based on output format
///
/// # Errors
///
/// Returns `TaskpulseError::Parse` if JSON serialization fails.
pub fn format_streak(streak: &StreakInfo, format: OutputFormat) -> Result<String, TaskpulseError> {
    match format {
        OutputFormat::Pretty => Ok(format_streak_pretty(streak)),
        OutputFormat::Json => to_json(streak),
    }
}

/// Format tag categories based on output format
///
/// # Errors
///
/// Returns `TaskpulseError::Parse` if JSON serialization fails.
pub fn format_categories(
    categories: &[CategoryAnalytics],
    range: &DateRange,
    format: OutputFormat,
) -> Result<String, TaskpulseError> {
    match format {
        OutputFormat::Pretty => Ok(format_categories_pretty(categories, range)),
        OutputFormat::Json => format_categories_json(categories, range),
    }
}

/// Format per-day statistics based on output format
///
/// # Errors
///
/// Returns `TaskpulseError::Parse` if JSON serialization fails.
pub fn format_daily(
    days: &[DailyStats],
    range: &DateRange,
    format: OutputFormat,
) -> Result<String, TaskpulseError> {
    match format {
        OutputFormat::Pretty => Ok(format_daily_pretty(days)),
        OutputFormat::Json => format_daily_json(days, range),
    }
}

/// Format the hour-of-day histogram based on output format
///
/// # Errors
///
/// Returns `TaskpulseError::Parse` if JSON serialization fails.
pub fn format_hourly(
    hours: &BTreeMap<u32, usize>,
    range: &DateRange,
    format: OutputFormat,
) -> Result<String, TaskpulseError> {
    match format {
        OutputFormat::Pretty => Ok(format_hourly_pretty(hours, range)),
        OutputFormat::Json => format_hourly_json(hours, range),
    }
}

/// Format the weekday histogram based on output format
///
/// # Errors
///
/// Returns `TaskpulseError::Parse` if JSON serialization fails.
pub fn format_weekday(
    weekdays: &BTreeMap<u32, usize>,
    range: &DateRange,
    format: OutputFormat,
) -> Result<String, TaskpulseError> {
    match format {
        OutputFormat::Pretty => Ok(format_weekday_pretty(weekdays, range)),
        OutputFormat::Json => format_weekday_json(weekdays, range),
    }
}

/// Format a completion-rate trend based on output format
///
/// # Errors
///
/// Returns `TaskpulseError::Parse` if JSON serialization fails.
pub fn format_trend(
    rates: &[f64],
    range: &DateRange,
    interval_days: i64,
    format: OutputFormat,
) -> Result<String, TaskpulseError> {
    match format {
        OutputFormat::Pretty => Ok(format_trend_pretty(rates, range, interval_days)),
        OutputFormat::Json => format_trend_json(rates, range, interval_days),
    }
}

/// Format an import result based on output format
///
/// # Errors
///
/// Returns `TaskpulseError::Parse` if JSON serialization fails.
pub fn format_import(
    imported: usize,
    database: &Path,
    format: OutputFormat,
) -> Result<String, TaskpulseError> {
    match format {
        OutputFormat::Pretty => Ok(format_import_pretty(imported, database)),
        OutputFormat::Json => format_import_json(imported, database),
    }
}
