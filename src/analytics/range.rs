//! Half-open date ranges.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::error::TaskpulseError;

/// A time interval `[start, end)`.
///
/// The start is inclusive and the end exclusive. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl DateRange {
    /// Create a range.
    ///
    /// # Errors
    ///
    /// Returns `TaskpulseError::InvalidRange` if `start > end`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, TaskpulseError> {
        if start > end {
            return Err(TaskpulseError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Range covering whole calendar days, `first` up to and including `last`.
    ///
    /// # Errors
    ///
    /// Returns `TaskpulseError::InvalidRange` if `first > last`.
    pub fn from_dates(first: NaiveDate, last: NaiveDate) -> Result<Self, TaskpulseError> {
        Self::new(midnight(first), midnight(last) + Duration::days(1))
    }

    /// The single calendar day `date`.
    #[must_use]
    pub fn day(date: NaiveDate) -> Self {
        let start = midnight(date);
        Self {
            start,
            end: start + Duration::days(1),
        }
    }

    #[must_use]
    pub const fn start(&self) -> NaiveDateTime {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> NaiveDateTime {
        self.end
    }

    #[must_use]
    pub fn contains(&self, t: NaiveDateTime) -> bool {
        self.start <= t && t < self.end
    }

    /// Whole days between the bounds.
    #[must_use]
    pub fn duration_in_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Calendar days touched by the range, oldest first.
    ///
    /// A range starting mid-day still yields that day.
    #[must_use]
    pub fn days(&self) -> Vec<NaiveDate> {
        let mut days = Vec::new();
        let mut day = self.start.date();
        while midnight(day) < self.end {
            days.push(day);
            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }
        days
    }

    /// Split into `ceil(duration_in_days / interval_days)` consecutive
    /// windows of `interval_days`, starting at `start`.
    ///
    /// The final window always ends at `end`. It is shorter than the others
    /// when the days do not divide evenly and absorbs any partial day left
    /// over. A step past the last representable datetime collapses into that
    /// final window.
    pub(crate) fn windows(&self, interval_days: i64) -> Vec<Self> {
        let total_days = self.duration_in_days();
        if total_days < 1 || interval_days < 1 {
            return Vec::new();
        }
        let count = (total_days - 1) / interval_days + 1;
        let step = Duration::try_days(interval_days);

        let mut windows = Vec::new();
        let mut cursor = self.start;
        for index in 1..=count {
            let next = if index == count {
                self.end
            } else {
                step.and_then(|length| cursor.checked_add_signed(length))
                    .map_or(self.end, |n| n.min(self.end))
            };
            windows.push(Self {
                start: cursor,
                end: next,
            });
            cursor = next;
        }
        windows
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} .. {}",
            self.start.format("%Y-%m-%d %H:%M"),
            self.end.format("%Y-%m-%d %H:%M")
        )
    }
}

/// Midnight at the start of `date`.
#[must_use]
pub fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}
