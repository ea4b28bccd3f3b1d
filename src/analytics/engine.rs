//! Analytics engine facade.
//!
//! Fetches one snapshot from its [`TaskSource`] per call and runs the pure
//! aggregation functions over it. Holds no state between calls.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDateTime};
use tracing::debug;

use super::category::{categorize, CategoryAnalytics};
use super::histogram::{hourly_productivity, weekday_productivity};
use super::period::AnalyticsTimePeriod;
use super::productivity::{productivity_metrics, ProductivityMetrics};
use super::range::DateRange;
use super::streak::{compute_streak, StreakInfo};
use super::summary::{daily_stats, summarize, AnalyticsSummary, DailyStats};
use super::trend::completion_rate_trend;
use crate::error::TaskpulseError;
use crate::tasks::{TaskSnapshot, TaskSource};

/// Computes analytics over the tasks provided by a [`TaskSource`].
pub struct AnalyticsEngine<S> {
    source: S,
    fixed_now: Option<NaiveDateTime>,
}

impl<S: TaskSource> AnalyticsEngine<S> {
    /// Create an engine reading "now" from the local clock.
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self {
            source,
            fixed_now: None,
        }
    }

    /// Pin "now" to a fixed instant.
    #[must_use]
    pub fn with_now(mut self, now: NaiveDateTime) -> Self {
        self.fixed_now = Some(now);
        self
    }

    /// The instant period resolution and streaks are anchored to.
    #[must_use]
    pub fn now(&self) -> NaiveDateTime {
        self.fixed_now.unwrap_or_else(|| Local::now().naive_local())
    }

    fn snapshot(&self) -> Result<Vec<TaskSnapshot>, TaskpulseError> {
        let tasks = self.source.get_all_tasks()?;
        debug!(count = tasks.len(), "fetched task snapshot");
        Ok(tasks)
    }

    /// Summary for a period.
    ///
    /// # Errors
    ///
    /// Returns an error if the period is an invalid custom range or the
    /// source fails.
    pub fn get_analytics_summary(
        &self,
        period: AnalyticsTimePeriod,
    ) -> Result<AnalyticsSummary, TaskpulseError> {
        let now = self.now();
        let range = period.resolve(now)?;
        let tasks = self.snapshot()?;
        Ok(summarize(&tasks, &range, now))
    }

    /// Productivity metrics anchored to now.
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails.
    pub fn get_productivity_metrics(&self) -> Result<ProductivityMetrics, TaskpulseError> {
        let tasks = self.snapshot()?;
        productivity_metrics(&tasks, self.now())
    }

    /// Streaks over the whole history.
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails.
    pub fn get_streak_info(&self) -> Result<StreakInfo, TaskpulseError> {
        let tasks = self.snapshot()?;
        Ok(compute_streak(&tasks, self.now()))
    }

    /// Tag categories for a period.
    ///
    /// # Errors
    ///
    /// Returns an error if the period is an invalid custom range or the
    /// source fails.
    pub fn get_category_analytics(
        &self,
        period: AnalyticsTimePeriod,
    ) -> Result<Vec<CategoryAnalytics>, TaskpulseError> {
        let range = period.resolve(self.now())?;
        let tasks = self.snapshot()?;
        Ok(categorize(&tasks, &range))
    }

    /// Per-day statistics for every day of `range`.
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails.
    pub fn get_daily_stats(&self, range: &DateRange) -> Result<Vec<DailyStats>, TaskpulseError> {
        let tasks = self.snapshot()?;
        Ok(daily_stats(&tasks, range))
    }

    /// Completions per hour of day within `range`.
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails.
    pub fn get_hourly_productivity(
        &self,
        range: &DateRange,
    ) -> Result<BTreeMap<u32, usize>, TaskpulseError> {
        let tasks = self.snapshot()?;
        Ok(hourly_productivity(&tasks, range))
    }

    /// Completions per ISO weekday within `range`.
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails.
    pub fn get_weekday_productivity(
        &self,
        range: &DateRange,
    ) -> Result<BTreeMap<u32, usize>, TaskpulseError> {
        let tasks = self.snapshot()?;
        Ok(weekday_productivity(&tasks, range))
    }

    /// Completion-rate trend over `range` in windows of `interval_days`.
    ///
    /// # Errors
    ///
    /// Returns `TaskpulseError::InvalidInterval` if `interval_days < 1`, or an
    /// error if the source fails.
    pub fn get_completion_rate_trend(
        &self,
        range: &DateRange,
        interval_days: i64,
    ) -> Result<Vec<f64>, TaskpulseError> {
        if interval_days < 1 {
            return Err(TaskpulseError::InvalidInterval(interval_days));
        }
        let tasks = self.snapshot()?;
        completion_rate_trend(&tasks, range, interval_days)
    }
}
