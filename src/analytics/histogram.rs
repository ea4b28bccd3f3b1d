//! Completion histograms by hour of day and day of week.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::Serialize;

use super::range::DateRange;
use crate::tasks::TaskSnapshot;

/// Monday-first weekday names, indexed by ISO weekday minus one.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

fn completions_in<'a>(
    tasks: &'a [TaskSnapshot],
    range: &'a DateRange,
) -> impl Iterator<Item = NaiveDateTime> + 'a {
    tasks
        .iter()
        .filter_map(TaskSnapshot::completion_time)
        .filter(move |t| range.contains(*t))
}

/// Completions per hour of day. Keys 0-23 are always present.
#[must_use]
pub fn hourly_productivity(tasks: &[TaskSnapshot], range: &DateRange) -> BTreeMap<u32, usize> {
    let mut hours: BTreeMap<u32, usize> = (0..24).map(|h| (h, 0)).collect();
    for completed in completions_in(tasks, range) {
        *hours.entry(completed.hour()).or_insert(0) += 1;
    }
    hours
}

/// Completions per ISO weekday (1 = Monday). Keys 1-7 are always present.
#[must_use]
pub fn weekday_productivity(tasks: &[TaskSnapshot], range: &DateRange) -> BTreeMap<u32, usize> {
    let mut weekdays: BTreeMap<u32, usize> = (1..=7).map(|d| (d, 0)).collect();
    for completed in completions_in(tasks, range) {
        *weekdays
            .entry(completed.weekday().number_from_monday())
            .or_insert(0) += 1;
    }
    weekdays
}

/// Key with the highest count; the lowest key wins ties.
///
/// Returns `None` when every bucket is empty.
#[must_use]
pub fn peak_bucket(histogram: &BTreeMap<u32, usize>) -> Option<u32> {
    histogram
        .iter()
        .filter(|(_, &count)| count > 0)
        .fold(None, |best: Option<(u32, usize)>, (&key, &count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((key, count)),
        })
        .map(|(key, _)| key)
}

/// Name of an ISO weekday number.
#[must_use]
pub fn weekday_name(weekday: u32) -> &'static str {
    weekday
        .checked_sub(1)
        .and_then(|i| WEEKDAY_NAMES.get(i as usize))
        .copied()
        .unwrap_or("Unknown")
}

/// Format an hour as a readable time.
#[must_use]
pub fn format_hour(hour: u32) -> String {
    match hour {
        0 => "12am".to_string(),
        1..=11 => format!("{hour}am"),
        12 => "12pm".to_string(),
        _ => format!("{}pm", hour - 12),
    }
}

/// Completions grouped into coarse parts of the day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeOfDayBreakdown {
    /// 0-6
    pub night: usize,
    /// 6-12
    pub morning: usize,
    /// 12-18
    pub afternoon: usize,
    /// 18-24
    pub evening: usize,
}

impl TimeOfDayBreakdown {
    #[must_use]
    pub fn from_hourly(hourly: &BTreeMap<u32, usize>) -> Self {
        let sum = |from: u32, to: u32| -> usize {
            hourly.range(from..to).map(|(_, count)| count).sum()
        };
        Self {
            night: sum(0, 6),
            morning: sum(6, 12),
            afternoon: sum(12, 18),
            evening: sum(18, 24),
        }
    }
}
