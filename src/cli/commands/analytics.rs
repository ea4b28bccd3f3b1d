//! Analytics command implementations.
//!
//! Each command resolves its period against the engine's "now", runs one
//! engine operation and renders the result.

use tracing::debug;

use crate::analytics::{AnalyticsEngine, AnalyticsTimePeriod, DateRange};
use crate::cli::args::{OutputFormat, PeriodArgs};
use crate::config::AnalyticsConfig;
use crate::error::TaskpulseError;
use crate::output::{
    format_categories, format_daily, format_hourly, format_productivity, format_streak,
    format_summary, format_trend, format_weekday,
};
use crate::tasks::TaskSource;

fn resolve_period(
    args: &PeriodArgs,
    settings: &AnalyticsConfig,
) -> Result<AnalyticsTimePeriod, TaskpulseError> {
    let period = args.resolve(settings.period()?)?;
    debug!(period = %period, "resolved period");
    Ok(period)
}

fn resolve_range<S: TaskSource>(
    engine: &AnalyticsEngine<S>,
    args: &PeriodArgs,
    settings: &AnalyticsConfig,
) -> Result<DateRange, TaskpulseError> {
    resolve_period(args, settings)?.resolve(engine.now())
}

/// Execute the summary command
///
/// # Errors
///
/// Returns an error if the period is invalid, the source fails, or output
/// formatting fails.
pub fn summary<S: TaskSource>(
    engine: &AnalyticsEngine<S>,
    args: &PeriodArgs,
    settings: &AnalyticsConfig,
    format: OutputFormat,
) -> Result<String, TaskpulseError> {
    let period = resolve_period(args, settings)?;
    let summary = engine.get_analytics_summary(period)?;
    format_summary(&summary, &period, format)
}

/// Execute the productivity command
///
/// # Errors
///
/// Returns an error if the source fails or output formatting fails.
pub fn productivity<S: TaskSource>(
    engine: &AnalyticsEngine<S>,
    format: OutputFormat,
) -> Result<String, TaskpulseError> {
    let metrics = engine.get_productivity_metrics()?;
    format_productivity(&metrics, format)
}

/// Execute the streak command
///
/// # Errors
///
/// Returns an error if the source fails or output formatting fails.
pub fn streak<S: TaskSource>(
    engine: &AnalyticsEngine<S>,
    format: OutputFormat,
) -> Result<String, TaskpulseError> {
    let streak = engine.get_streak_info()?;
    format_streak(&streak, format)
}

/// Execute the categories command
///
/// Shows at most `limit` categories, or `analytics.top_categories` when no
/// limit is given.
///
/// # Errors
///
/// Returns an error if the period is invalid, the source fails, or output
/// formatting fails.
pub fn categories<S: TaskSource>(
    engine: &AnalyticsEngine<S>,
    args: &PeriodArgs,
    limit: Option<usize>,
    settings: &AnalyticsConfig,
    format: OutputFormat,
) -> Result<String, TaskpulseError> {
    let period = resolve_period(args, settings)?;
    let range = period.resolve(engine.now())?;
    let mut categories = engine.get_category_analytics(period)?;
    categories.truncate(limit.unwrap_or(settings.top_categories));
    format_categories(&categories, &range, format)
}

/// Execute the daily command
///
/// # Errors
///
/// Returns an error if the period is invalid, the source fails, or output
/// formatting fails.
pub fn daily<S: TaskSource>(
    engine: &AnalyticsEngine<S>,
    args: &PeriodArgs,
    settings: &AnalyticsConfig,
    format: OutputFormat,
) -> Result<String, TaskpulseError> {
    let range = resolve_range(engine, args, settings)?;
    let days = engine.get_daily_stats(&range)?;
    format_daily(&days, &range, format)
}

/// Execute the hourly command
///
/// # Errors
///
/// Returns an error if the period is invalid, the source fails, or output
/// formatting fails.
pub fn hourly<S: TaskSource>(
    engine: &AnalyticsEngine<S>,
    args: &PeriodArgs,
    settings: &AnalyticsConfig,
    format: OutputFormat,
) -> Result<String, TaskpulseError> {
    let range = resolve_range(engine, args, settings)?;
    let hours = engine.get_hourly_productivity(&range)?;
    format_hourly(&hours, &range, format)
}

/// Execute the weekday command
///
/// # Errors
///
/// Returns an error if the period is invalid, the source fails, or output
/// formatting fails.
pub fn weekday<S: TaskSource>(
    engine: &AnalyticsEngine<S>,
    args: &PeriodArgs,
    settings: &AnalyticsConfig,
    format: OutputFormat,
) -> Result<String, TaskpulseError> {
    let range = resolve_range(engine, args, settings)?;
    let weekdays = engine.get_weekday_productivity(&range)?;
    format_weekday(&weekdays, &range, format)
}

/// Execute the trend command
///
/// # Errors
///
/// Returns an error if the period or interval is invalid, the source fails,
/// or output formatting fails.
pub fn trend<S: TaskSource>(
    engine: &AnalyticsEngine<S>,
    args: &PeriodArgs,
    interval: Option<i64>,
    settings: &AnalyticsConfig,
    format: OutputFormat,
) -> Result<String, TaskpulseError> {
    let range = resolve_range(engine, args, settings)?;
    let interval_days = interval.unwrap_or(settings.trend_interval_days);
    let rates = engine.get_completion_rate_trend(&range, interval_days)?;
    format_trend(&rates, &range, interval_days, format)
}
