//! Completion-rate trends over fixed-width windows.

use chrono::NaiveDateTime;

use super::period::AnalyticsTimePeriod;
use super::range::DateRange;
use super::summary::ratio;
use crate::error::TaskpulseError;
use crate::tasks::TaskSnapshot;

/// Completion rate per consecutive window of `interval_days`, oldest first.
///
/// There are `ceil(range.duration_in_days() / interval_days)` windows. They
/// start at `range.start()` and the last one ends at `range.end()`, so a
/// range that is not a whole number of days folds its remainder into it.
/// Each rate covers the tasks created inside that window.
///
/// # Errors
///
/// Returns `TaskpulseError::InvalidInterval` if `interval_days < 1`.
pub fn completion_rate_trend(
    tasks: &[TaskSnapshot],
    range: &DateRange,
    interval_days: i64,
) -> Result<Vec<f64>, TaskpulseError> {
    if interval_days < 1 {
        return Err(TaskpulseError::InvalidInterval(interval_days));
    }

    let rates = range
        .windows(interval_days)
        .iter()
        .map(|window| window_rate(tasks, window))
        .collect();

    Ok(rates)
}

fn window_rate(tasks: &[TaskSnapshot], window: &DateRange) -> f64 {
    let (total, completed) = tasks
        .iter()
        .filter(|t| window.contains(t.created_at))
        .fold((0, 0), |(total, completed), t| {
            (total + 1, completed + usize::from(t.is_completed()))
        });
    ratio(completed, total)
}

fn daily_trend(
    tasks: &[TaskSnapshot],
    period: AnalyticsTimePeriod,
    now: NaiveDateTime,
) -> Result<Vec<f64>, TaskpulseError> {
    completion_rate_trend(tasks, &period.resolve(now)?, 1)
}

/// Daily completion rates for the past 7 days, oldest first.
///
/// # Errors
///
/// Propagates range resolution errors.
pub fn weekly_trend(tasks: &[TaskSnapshot], now: NaiveDateTime) -> Result<Vec<f64>, TaskpulseError> {
    daily_trend(tasks, AnalyticsTimePeriod::Last7Days, now)
}

/// Daily completion rates for the past 30 days, oldest first.
///
/// # Errors
///
/// Propagates range resolution errors.
pub fn monthly_trend(tasks: &[TaskSnapshot], now: NaiveDateTime) -> Result<Vec<f64>, TaskpulseError> {
    daily_trend(tasks, AnalyticsTimePeriod::Last30Days, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::TaskStatus;
    use chrono::{Duration, NaiveDate};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, d).unwrap()
    }

    fn created(id: &str, d: u32, completed: bool) -> TaskSnapshot {
        let at = day(d).and_hms_opt(9, 0, 0).unwrap();
        let mut task = TaskSnapshot::new(id, at);
        if completed {
            task.status = TaskStatus::Completed;
            task.completed_at = Some(at + Duration::hours(1));
        }
        task
    }

    #[test]
    fn test_ten_days_in_pairs() {
        let range = DateRange::from_dates(day(1), day(10)).unwrap();
        let tasks = vec![
            created("a", 1, true),
            created("b", 2, false),
            created("c", 5, true),
            created("d", 10, true),
        ];

        let trend = completion_rate_trend(&tasks, &range, 2).unwrap();
        assert_eq!(trend.len(), 5);
        assert_eq!(trend, vec![0.5, 0.0, 1.0, 0.0, 1.0]);
        assert!(trend.iter().all(|r| (0.0..=1.0).contains(r)));
    }

    #[test]
    fn test_length_is_ceiling() {
        let range = DateRange::from_dates(day(1), day(10)).unwrap();
        for interval in 1..=12 {
            let trend = completion_rate_trend(&[], &range, interval).unwrap();
            let expected = (range.duration_in_days() + interval - 1) / interval;
            assert_eq!(trend.len() as i64, expected);
        }
    }

    #[test]
    fn test_length_is_ceiling_for_partial_days() {
        let start = day(1).and_hms_opt(0, 0, 0).unwrap();
        for hours in [36, 60, 24 * 9 + 1, 24 * 10 - 1] {
            let range = DateRange::new(start, start + Duration::hours(hours)).unwrap();
            for interval in 1..=4 {
                let trend = completion_rate_trend(&[], &range, interval).unwrap();
                let expected = (range.duration_in_days() + interval - 1) / interval;
                assert_eq!(trend.len() as i64, expected, "{hours}h every {interval}d");
            }
        }
    }

    #[test]
    fn test_partial_day_counts_in_last_window() {
        let start = day(1).and_hms_opt(0, 0, 0).unwrap();
        let range = DateRange::new(start, start + Duration::hours(36)).unwrap();
        let tasks = vec![created("a", 1, false), created("b", 2, true)];

        let trend = completion_rate_trend(&tasks, &range, 1).unwrap();
        assert_eq!(trend, vec![0.5]);
    }

    #[test]
    fn test_huge_interval_is_one_window() {
        let range = DateRange::from_dates(day(1), day(10)).unwrap();
        let tasks = vec![created("a", 1, true), created("b", 10, false)];

        for interval in [100_000_000, i64::MAX] {
            let trend = completion_rate_trend(&tasks, &range, interval).unwrap();
            assert_eq!(trend, vec![0.5]);
        }
    }

    #[test]
    fn test_invalid_interval() {
        let range = DateRange::from_dates(day(1), day(10)).unwrap();
        assert!(matches!(
            completion_rate_trend(&[], &range, 0),
            Err(TaskpulseError::InvalidInterval(0))
        ));
        assert!(completion_rate_trend(&[], &range, -3).is_err());
    }

    #[test]
    fn test_empty_range_gives_empty_trend() {
        let start = day(1).and_hms_opt(0, 0, 0).unwrap();
        let range = DateRange::new(start, start).unwrap();
        assert!(completion_rate_trend(&[], &range, 1).unwrap().is_empty());
    }

    #[test]
    fn test_completed_later_still_counts_in_creation_window() {
        let mut task = created("a", 1, false);
        task.status = TaskStatus::Completed;
        task.completed_at = Some(day(4).and_hms_opt(9, 0, 0).unwrap());
        let range = DateRange::from_dates(day(1), day(4)).unwrap();
        let trend = completion_rate_trend(&[task], &range, 1).unwrap();
        assert_eq!(trend, vec![1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_weekly_and_monthly_lengths() {
        let now = day(20).and_hms_opt(17, 0, 0).unwrap();
        let tasks = vec![created("today", 20, true), created("old", 14, false)];

        let weekly = weekly_trend(&tasks, now).unwrap();
        assert_eq!(weekly.len(), 7);
        assert_eq!(weekly[6], 1.0);
        assert_eq!(weekly[0], 0.0);

        let monthly = monthly_trend(&tasks, now).unwrap();
        assert_eq!(monthly.len(), 30);
        assert_eq!(monthly[29], 1.0);
    }
}
