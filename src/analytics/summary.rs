//! Range summaries and per-day statistics.
//!
//! A task belongs to a range when it was created OR completed inside it, so
//! work started before a window but finished within it still counts.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::debug;

use super::range::DateRange;
use super::streak::compute_streak;
use crate::tasks::{Priority, TaskSnapshot, TaskStatus};

/// Aggregate view of the tasks in a range.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// Pending and in-progress
    pub pending_tasks: usize,
    pub cancelled_tasks: usize,
    pub completion_rate: f64,
    pub current_streak: usize,
    pub longest_streak: usize,
    /// Mean minutes over completed tasks with a recorded duration
    pub average_task_duration: f64,
    pub tasks_by_priority: BTreeMap<Priority, usize>,
    pub tasks_by_status: BTreeMap<TaskStatus, usize>,
    pub tasks_by_tag: BTreeMap<String, usize>,
    pub tasks_by_project: BTreeMap<String, usize>,
    pub daily_stats: Vec<DailyStats>,
}

/// Statistics for a single calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub date: NaiveDate,
    /// Tasks created or completed that day
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub created_tasks: usize,
    pub completion_rate: f64,
    /// Minutes spent on tasks completed that day
    pub total_duration: f64,
    pub tasks_by_priority: BTreeMap<Priority, usize>,
    pub tasks_by_tag: BTreeMap<String, usize>,
}

/// `part / whole`, or `0.0` when `whole` is zero.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

#[allow(clippy::cast_precision_loss)]
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Tasks created or completed within `range`.
pub(crate) fn tasks_in_range<'a>(
    tasks: &'a [TaskSnapshot],
    range: &DateRange,
) -> Vec<&'a TaskSnapshot> {
    tasks.iter().filter(|t| t.is_in_range(range)).collect()
}

/// Summarize the tasks active in `range`.
///
/// `tasks` must be the complete history: streaks are computed over all of it
/// relative to `now`, every other figure only over in-range tasks.
#[must_use]
pub fn summarize(tasks: &[TaskSnapshot], range: &DateRange, now: NaiveDateTime) -> AnalyticsSummary {
    let in_range = tasks_in_range(tasks, range);

    let mut tasks_by_priority = BTreeMap::new();
    let mut tasks_by_status = BTreeMap::new();
    let mut tasks_by_tag = BTreeMap::new();
    let mut tasks_by_project = BTreeMap::new();
    let mut durations = Vec::new();

    for task in &in_range {
        *tasks_by_priority.entry(task.priority).or_insert(0) += 1;
        *tasks_by_status.entry(task.status).or_insert(0) += 1;
        for tag in &task.tags {
            *tasks_by_tag.entry(tag.clone()).or_insert(0) += 1;
        }
        if let Some(project) = &task.project_id {
            *tasks_by_project.entry(project.clone()).or_insert(0) += 1;
        }
        if let Some(duration) = task.completed_duration() {
            durations.push(duration);
        }
    }

    let count = |status: TaskStatus| tasks_by_status.get(&status).copied().unwrap_or(0);
    let total_tasks = in_range.len();
    let completed_tasks = count(TaskStatus::Completed);
    let pending_tasks = count(TaskStatus::Pending) + count(TaskStatus::InProgress);
    let cancelled_tasks = count(TaskStatus::Cancelled);

    let streak = compute_streak(tasks, now);

    debug!(
        range = %range,
        total = total_tasks,
        completed = completed_tasks,
        "summarized tasks"
    );

    AnalyticsSummary {
        start_date: range.start(),
        end_date: range.end(),
        total_tasks,
        completed_tasks,
        pending_tasks,
        cancelled_tasks,
        completion_rate: ratio(completed_tasks, total_tasks),
        current_streak: streak.current_streak,
        longest_streak: streak.longest_streak,
        average_task_duration: mean(&durations),
        tasks_by_priority,
        tasks_by_status,
        tasks_by_tag,
        tasks_by_project,
        daily_stats: daily_stats(tasks, range),
    }
}

/// One [`DailyStats`] per calendar day touched by `range`, oldest first.
#[must_use]
pub fn daily_stats(tasks: &[TaskSnapshot], range: &DateRange) -> Vec<DailyStats> {
    range
        .days()
        .into_iter()
        .map(|date| stats_for_day(tasks, date))
        .collect()
}

fn stats_for_day(tasks: &[TaskSnapshot], date: NaiveDate) -> DailyStats {
    let day = DateRange::day(date);

    let mut total_tasks = 0;
    let mut completed_tasks = 0;
    let mut created_tasks = 0;
    let mut total_duration = 0.0;
    let mut tasks_by_priority = BTreeMap::new();
    let mut tasks_by_tag = BTreeMap::new();

    for task in tasks.iter().filter(|t| t.is_in_range(&day)) {
        total_tasks += 1;
        if day.contains(task.created_at) {
            created_tasks += 1;
        }
        if task.completed_within(&day) {
            completed_tasks += 1;
            total_duration += task.completed_duration().unwrap_or(0.0);
        }
        *tasks_by_priority.entry(task.priority).or_insert(0) += 1;
        for tag in &task.tags {
            *tasks_by_tag.entry(tag.clone()).or_insert(0) += 1;
        }
    }

    DailyStats {
        date,
        total_tasks,
        completed_tasks,
        created_tasks,
        completion_rate: ratio(completed_tasks, total_tasks),
        total_duration,
        tasks_by_priority,
        tasks_by_tag,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 4, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn now() -> NaiveDateTime {
        at(20, 18)
    }

    fn week() -> DateRange {
        DateRange::new(at(14, 0), at(21, 0)).unwrap()
    }

    fn task(id: &str, status: TaskStatus, created: NaiveDateTime) -> TaskSnapshot {
        let mut task = TaskSnapshot::new(id, created);
        task.status = status;
        if status == TaskStatus::Completed {
            task.completed_at = Some(created + Duration::hours(2));
        }
        task
    }

    #[test]
    fn test_empty_summary() {
        let summary = summarize(&[], &week(), now());
        assert_eq!(summary.total_tasks, 0);
        assert_eq!(summary.completion_rate, 0.0);
        assert_eq!(summary.average_task_duration, 0.0);
        assert!(summary.tasks_by_status.is_empty());
        assert_eq!(summary.daily_stats.len(), 7);
    }

    #[test]
    fn test_mixed_statuses() {
        let mut done = task("a", TaskStatus::Completed, at(15, 9));
        done.actual_duration = Some(60.0);
        let tasks = vec![
            done,
            task("b", TaskStatus::Pending, at(16, 9)),
            task("c", TaskStatus::Cancelled, at(17, 9)),
        ];

        let summary = summarize(&tasks, &week(), now());
        assert_eq!(summary.total_tasks, 3);
        assert_eq!(summary.completed_tasks, 1);
        assert_eq!(summary.pending_tasks, 1);
        assert_eq!(summary.cancelled_tasks, 1);
        assert!((summary.completion_rate - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(summary.average_task_duration, 60.0);
        assert_eq!(summary.tasks_by_status.values().sum::<usize>(), 3);
    }

    #[test]
    fn test_in_progress_counts_as_pending() {
        let tasks = vec![
            task("a", TaskStatus::InProgress, at(15, 9)),
            task("b", TaskStatus::Pending, at(15, 10)),
        ];
        let summary = summarize(&tasks, &week(), now());
        assert_eq!(summary.pending_tasks, 2);
        assert_eq!(summary.tasks_by_status.get(&TaskStatus::InProgress), Some(&1));
    }

    #[test]
    fn test_completed_inside_created_before() {
        let mut old = TaskSnapshot::new("old", at(1, 9));
        old.status = TaskStatus::Completed;
        old.completed_at = Some(at(16, 11));

        let outside = task("out", TaskStatus::Pending, at(2, 9));

        let summary = summarize(&[old, outside], &week(), now());
        assert_eq!(summary.total_tasks, 1);
        assert_eq!(summary.completed_tasks, 1);
        assert_eq!(summary.completion_rate, 1.0);
    }

    #[test]
    fn test_range_end_is_exclusive() {
        let boundary = task("edge", TaskStatus::Pending, at(21, 0));
        let summary = summarize(&[boundary], &week(), now());
        assert_eq!(summary.total_tasks, 0);
    }

    #[test]
    fn test_average_duration_skips_missing() {
        let mut a = task("a", TaskStatus::Completed, at(15, 9));
        a.actual_duration = Some(30.0);
        let mut b = task("b", TaskStatus::Completed, at(15, 10));
        b.actual_duration = Some(90.0);
        let c = task("c", TaskStatus::Completed, at(15, 11));
        let mut pending = task("d", TaskStatus::Pending, at(15, 12));
        pending.actual_duration = Some(500.0);

        let summary = summarize(&[a, b, c, pending], &week(), now());
        assert_eq!(summary.average_task_duration, 60.0);
    }

    #[test]
    fn test_frequency_maps() {
        let mut a = task("a", TaskStatus::Pending, at(15, 9));
        a.tags = ["work".to_string(), "deep".to_string()].into();
        a.project_id = Some("alpha".to_string());
        a.priority = Priority::High;
        let mut b = task("b", TaskStatus::Pending, at(15, 10));
        b.tags = ["work".to_string()].into();
        let c = task("c", TaskStatus::Pending, at(15, 11));

        let summary = summarize(&[a, b, c], &week(), now());
        assert_eq!(summary.tasks_by_tag.get("work"), Some(&2));
        assert_eq!(summary.tasks_by_tag.get("deep"), Some(&1));
        assert_eq!(summary.tasks_by_tag.len(), 2);
        assert_eq!(summary.tasks_by_project.len(), 1);
        assert_eq!(summary.tasks_by_priority.get(&Priority::High), Some(&1));
        assert_eq!(summary.tasks_by_priority.get(&Priority::Medium), Some(&2));
        assert!(!summary.tasks_by_priority.contains_key(&Priority::Low));
    }

    #[test]
    fn test_summary_carries_streak() {
        let tasks = vec![
            task("a", TaskStatus::Completed, at(19, 9)),
            task("b", TaskStatus::Completed, at(20, 9)),
        ];
        let summary = summarize(&tasks, &week(), now());
        assert_eq!(summary.current_streak, 2);
        assert_eq!(summary.longest_streak, 2);
    }

    #[test]
    fn test_daily_stats_per_day() {
        let mut spanning = TaskSnapshot::new("s", at(15, 9));
        spanning.status = TaskStatus::Completed;
        spanning.completed_at = Some(at(17, 16));
        spanning.actual_duration = Some(45.0);
        spanning.tags = ["work".to_string()].into();

        let created = task("p", TaskStatus::Pending, at(17, 8));

        let days = daily_stats(&[spanning, created], &week());
        assert_eq!(days.len(), 7);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 4, 14).unwrap());

        let d15 = &days[1];
        assert_eq!(d15.total_tasks, 1);
        assert_eq!(d15.created_tasks, 1);
        assert_eq!(d15.completed_tasks, 0);

        let d17 = &days[3];
        assert_eq!(d17.total_tasks, 2);
        assert_eq!(d17.created_tasks, 1);
        assert_eq!(d17.completed_tasks, 1);
        assert_eq!(d17.completion_rate, 0.5);
        assert_eq!(d17.total_duration, 45.0);
        assert_eq!(d17.tasks_by_tag.get("work"), Some(&1));

        let d16 = &days[2];
        assert_eq!(d16.total_tasks, 0);
        assert_eq!(d16.completion_rate, 0.0);
    }

    #[test]
    fn test_summary_is_idempotent() {
        let tasks = vec![
            task("a", TaskStatus::Completed, at(15, 9)),
            task("b", TaskStatus::Pending, at(16, 9)),
        ];
        assert_eq!(
            summarize(&tasks, &week(), now()),
            summarize(&tasks, &week(), now())
        );
    }

    #[test]
    fn test_ratio_zero_guard() {
        assert_eq!(ratio(0, 0), 0.0);
        assert_eq!(ratio(1, 4), 0.25);
        assert_eq!(mean(&[]), 0.0);
    }
}
