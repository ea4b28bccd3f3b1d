//! Overall productivity metrics.
//!
//! Combines the week and month summaries, streaks, trends and histograms into
//! a single dashboard-style value.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use super::histogram::{hourly_productivity, weekday_productivity};
use super::period::AnalyticsTimePeriod;
use super::range::DateRange;
use super::streak::compute_streak;
use super::summary::{mean, ratio, tasks_in_range};
use super::trend::{monthly_trend, weekly_trend};
use crate::error::TaskpulseError;
use crate::tasks::TaskSnapshot;

/// Window, in days, for the per-day and per-hour averages.
const ACTIVITY_WINDOW_DAYS: i64 = 30;

/// Productivity metrics anchored to "now".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductivityMetrics {
    /// Completion rate over the current Monday-first week
    pub weekly_completion_rate: f64,
    /// Completion rate over the current calendar month
    pub monthly_completion_rate: f64,
    pub tasks_completed_this_week: usize,
    pub tasks_completed_this_month: usize,
    pub current_streak: usize,
    pub longest_streak: usize,
    /// Daily completion rates, past 7 days, oldest first
    pub weekly_trend: Vec<f64>,
    /// Daily completion rates, past 30 days, oldest first
    pub monthly_trend: Vec<f64>,
    /// Completions per hour over the past 30 days
    pub hourly_productivity: BTreeMap<u32, usize>,
    /// Completions per ISO weekday over the past 30 days
    pub weekday_productivity: BTreeMap<u32, usize>,
    /// Completions per day over the past 30 days
    pub average_tasks_per_day: f64,
    /// Mean hours from creation to completion over the past 30 days
    pub average_completion_time: f64,
}

/// Compute productivity metrics from the full task history.
///
/// # Errors
///
/// Propagates range resolution errors.
pub fn productivity_metrics(
    tasks: &[TaskSnapshot],
    now: NaiveDateTime,
) -> Result<ProductivityMetrics, TaskpulseError> {
    let week = AnalyticsTimePeriod::ThisWeek.resolve(now)?;
    let month = AnalyticsTimePeriod::ThisMonth.resolve(now)?;
    let recent = AnalyticsTimePeriod::Last30Days.resolve(now)?;

    let (weekly_completion_rate, tasks_completed_this_week) = completion_in(tasks, &week);
    let (monthly_completion_rate, tasks_completed_this_month) = completion_in(tasks, &month);

    let streak = compute_streak(tasks, now);

    let recent_completions = tasks.iter().filter(|t| t.completed_within(&recent)).count();
    #[allow(clippy::cast_precision_loss)]
    let average_tasks_per_day = recent_completions as f64 / ACTIVITY_WINDOW_DAYS as f64;

    Ok(ProductivityMetrics {
        weekly_completion_rate,
        monthly_completion_rate,
        tasks_completed_this_week,
        tasks_completed_this_month,
        current_streak: streak.current_streak,
        longest_streak: streak.longest_streak,
        weekly_trend: weekly_trend(tasks, now)?,
        monthly_trend: monthly_trend(tasks, now)?,
        hourly_productivity: hourly_productivity(tasks, &recent),
        weekday_productivity: weekday_productivity(tasks, &recent),
        average_tasks_per_day,
        average_completion_time: average_completion_hours(tasks, &recent),
    })
}

/// Summary completion rate and number of completions inside `range`.
fn completion_in(tasks: &[TaskSnapshot], range: &DateRange) -> (f64, usize) {
    let in_range = tasks_in_range(tasks, range);
    let completed = in_range.iter().filter(|t| t.is_completed()).count();
    let completed_inside = in_range.iter().filter(|t| t.completed_within(range)).count();
    (ratio(completed, in_range.len()), completed_inside)
}

#[allow(clippy::cast_precision_loss)]
fn average_completion_hours(tasks: &[TaskSnapshot], range: &DateRange) -> f64 {
    let hours: Vec<f64> = tasks
        .iter()
        .filter_map(|t| {
            let completed = t.completion_time().filter(|c| range.contains(*c))?;
            let minutes = (completed - t.created_at).num_minutes().max(0);
            Some(minutes as f64 / 60.0)
        })
        .collect();
    mean(&hours)
}
