//! Completion streaks.
//!
//! A streak is a run of consecutive calendar days with at least one
//! completion. Streaks always span the whole task history.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::tasks::TaskSnapshot;

/// Streak information derived from completion dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakInfo {
    /// Consecutive days ending today or yesterday
    pub current_streak: usize,
    /// Longest run ever
    pub longest_streak: usize,
    pub last_completion_date: Option<NaiveDate>,
    /// Oldest day of the current run
    pub streak_start_date: Option<NaiveDate>,
    /// Distinct days with at least one completion
    pub completion_dates: BTreeSet<NaiveDate>,
    /// Last completion was today or yesterday
    pub is_streak_active: bool,
    /// Days between today and the last completion
    pub days_since_completion: Option<i64>,
}

impl StreakInfo {
    fn empty() -> Self {
        Self {
            current_streak: 0,
            longest_streak: 0,
            last_completion_date: None,
            streak_start_date: None,
            completion_dates: BTreeSet::new(),
            is_streak_active: false,
            days_since_completion: None,
        }
    }
}

/// Compute streak information over every completed task.
#[must_use]
pub fn compute_streak(tasks: &[TaskSnapshot], now: NaiveDateTime) -> StreakInfo {
    let today = now.date();

    let dates: BTreeSet<NaiveDate> = tasks
        .iter()
        .filter_map(TaskSnapshot::completion_time)
        .map(|t| t.date())
        .collect();

    let Some(&last) = dates.last() else {
        return StreakInfo::empty();
    };

    let longest_streak = longest_run(&dates);
    let is_streak_active = last == today || last == today - Duration::days(1);

    let (current_streak, streak_start_date) = if is_streak_active {
        let mut run = 1;
        let mut start = last;
        for date in dates.iter().rev().skip(1) {
            if *date == start - Duration::days(1) {
                run += 1;
                start = *date;
            } else {
                break;
            }
        }
        (run, Some(start))
    } else {
        (0, None)
    };

    StreakInfo {
        current_streak,
        longest_streak,
        last_completion_date: Some(last),
        streak_start_date,
        completion_dates: dates,
        is_streak_active,
        days_since_completion: Some((today - last).num_days().max(0)),
    }
}

fn longest_run(dates: &BTreeSet<NaiveDate>) -> usize {
    let mut longest = 0;
    let mut run = 0;
    let mut prev: Option<NaiveDate> = None;

    for date in dates {
        run = match prev {
            Some(p) if *date - p == Duration::days(1) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(*date);
    }

    longest
}
