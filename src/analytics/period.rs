//! Symbolic time periods and their resolution to concrete ranges.

use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

use super::range::{midnight, DateRange};
use crate::error::TaskpulseError;

/// A period the analytics can be computed over.
///
/// Every variant except `Custom` is anchored to "now" when resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsTimePeriod {
    Today,
    /// Monday-first calendar week.
    ThisWeek,
    ThisMonth,
    ThisYear,
    Last7Days,
    Last30Days,
    Last90Days,
    Custom {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

impl AnalyticsTimePeriod {
    /// Resolve the period to a range relative to `now`.
    ///
    /// # Errors
    ///
    /// Returns `TaskpulseError::InvalidRange` for a `Custom` period whose
    /// start lies after its end, and `TaskpulseError::DateOutOfRange` when a
    /// calendar boundary falls outside the representable dates.
    pub fn resolve(&self, now: NaiveDateTime) -> Result<DateRange, TaskpulseError> {
        let today = now.date();
        match *self {
            Self::Today => Ok(DateRange::day(today)),
            Self::ThisWeek => {
                let monday =
                    today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
                let start = midnight(monday);
                DateRange::new(start, start + Duration::days(7))
            },
            Self::ThisMonth => {
                let (next_year, next_month) = if today.month() == 12 {
                    (today.year() + 1, 1)
                } else {
                    (today.year(), today.month() + 1)
                };
                DateRange::new(
                    midnight(first_day(today.year(), today.month())?),
                    midnight(first_day(next_year, next_month)?),
                )
            },
            Self::ThisYear => DateRange::new(
                midnight(first_day(today.year(), 1)?),
                midnight(first_day(today.year() + 1, 1)?),
            ),
            Self::Last7Days => trailing_days(today, 7),
            Self::Last30Days => trailing_days(today, 30),
            Self::Last90Days => trailing_days(today, 90),
            Self::Custom { start, end } => DateRange::new(start, end),
        }
    }

    /// Custom period spanning whole calendar days, both ends included.
    #[must_use]
    pub fn custom_dates(first: NaiveDate, last: NaiveDate) -> Self {
        Self::Custom {
            start: midnight(first),
            end: midnight(last) + Duration::days(1),
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::ThisWeek => "this-week",
            Self::ThisMonth => "this-month",
            Self::ThisYear => "this-year",
            Self::Last7Days => "last-7-days",
            Self::Last30Days => "last-30-days",
            Self::Last90Days => "last-90-days",
            Self::Custom { .. } => "custom",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::ThisWeek => "This week",
            Self::ThisMonth => "This month",
            Self::ThisYear => "This year",
            Self::Last7Days => "Last 7 days",
            Self::Last30Days => "Last 30 days",
            Self::Last90Days => "Last 90 days",
            Self::Custom { .. } => "Custom range",
        }
    }
}

impl std::fmt::Display for AnalyticsTimePeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalyticsTimePeriod {
    type Err = TaskpulseError;

    /// Parse a symbolic period name. `custom` cannot be parsed since it needs
    /// explicit bounds.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect();

        match normalized.as_str() {
            "today" => Ok(Self::Today),
            "thisweek" | "week" => Ok(Self::ThisWeek),
            "thismonth" | "month" => Ok(Self::ThisMonth),
            "thisyear" | "year" => Ok(Self::ThisYear),
            "last7days" | "7d" => Ok(Self::Last7Days),
            "last30days" | "30d" => Ok(Self::Last30Days),
            "last90days" | "90d" => Ok(Self::Last90Days),
            _ => Err(TaskpulseError::Config(format!("Unknown time period: {s}"))),
        }
    }
}

fn first_day(year: i32, month: u32) -> Result<NaiveDate, TaskpulseError> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| TaskpulseError::DateOutOfRange(format!("{year}-{month:02}-01")))
}

fn trailing_days(today: NaiveDate, days: i64) -> Result<DateRange, TaskpulseError> {
    let end = midnight(today) + Duration::days(1);
    DateRange::new(end - Duration::days(days), end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // Wednesday afternoon
    fn now() -> NaiveDateTime {
        date(2024, 2, 14).and_hms_opt(15, 30, 0).unwrap()
    }

    #[test]
    fn test_today() {
        let range = AnalyticsTimePeriod::Today.resolve(now()).unwrap();
        assert_eq!(range.start(), midnight(date(2024, 2, 14)));
        assert_eq!(range.end(), midnight(date(2024, 2, 15)));
        assert!(range.contains(now()));
    }

    #[test]
    fn test_this_week_starts_monday() {
        let range = AnalyticsTimePeriod::ThisWeek.resolve(now()).unwrap();
        assert_eq!(range.start(), midnight(date(2024, 2, 12)));
        assert_eq!(range.end(), midnight(date(2024, 2, 19)));
    }

    #[test]
    fn test_this_week_on_sunday() {
        let sunday = date(2024, 2, 18).and_hms_opt(23, 59, 0).unwrap();
        let range = AnalyticsTimePeriod::ThisWeek.resolve(sunday).unwrap();
        assert_eq!(range.start(), midnight(date(2024, 2, 12)));
        assert!(range.contains(sunday));
    }

    #[test]
    fn test_this_month_leap_february() {
        let range = AnalyticsTimePeriod::ThisMonth.resolve(now()).unwrap();
        assert_eq!(range.start(), midnight(date(2024, 2, 1)));
        assert_eq!(range.end(), midnight(date(2024, 3, 1)));
        assert_eq!(range.duration_in_days(), 29);
    }

    #[test]
    fn test_this_month_december_rolls_year() {
        let dec = date(2023, 12, 31).and_hms_opt(12, 0, 0).unwrap();
        let range = AnalyticsTimePeriod::ThisMonth.resolve(dec).unwrap();
        assert_eq!(range.start(), midnight(date(2023, 12, 1)));
        assert_eq!(range.end(), midnight(date(2024, 1, 1)));
    }

    #[test]
    fn test_this_year() {
        let range = AnalyticsTimePeriod::ThisYear.resolve(now()).unwrap();
        assert_eq!(range.start(), midnight(date(2024, 1, 1)));
        assert_eq!(range.end(), midnight(date(2025, 1, 1)));

        let last_day = date(2023, 12, 31).and_hms_opt(1, 0, 0).unwrap();
        let range = AnalyticsTimePeriod::ThisYear.resolve(last_day).unwrap();
        assert_eq!(range.start(), midnight(date(2023, 1, 1)));
        assert_eq!(range.end(), midnight(date(2024, 1, 1)));
    }

    #[test]
    fn test_calendar_boundary_past_last_date() {
        let last = NaiveDate::MAX.and_hms_opt(12, 0, 0).unwrap();
        for period in [AnalyticsTimePeriod::ThisMonth, AnalyticsTimePeriod::ThisYear] {
            assert!(matches!(
                period.resolve(last),
                Err(TaskpulseError::DateOutOfRange(_))
            ));
        }
    }

    #[test]
    fn test_trailing_periods_include_today() {
        for (period, days) in [
            (AnalyticsTimePeriod::Last7Days, 7),
            (AnalyticsTimePeriod::Last30Days, 30),
            (AnalyticsTimePeriod::Last90Days, 90),
        ] {
            let range = period.resolve(now()).unwrap();
            assert_eq!(range.end(), midnight(date(2024, 2, 15)));
            assert_eq!(range.duration_in_days(), days);
            assert!(range.contains(now()));
        }
    }

    #[test]
    fn test_custom_verbatim() {
        let start = date(2024, 1, 3).and_hms_opt(10, 0, 0).unwrap();
        let end = date(2024, 1, 9).and_hms_opt(10, 0, 0).unwrap();
        let range = AnalyticsTimePeriod::Custom { start, end }
            .resolve(now())
            .unwrap();
        assert_eq!(range.start(), start);
        assert_eq!(range.end(), end);
    }

    #[test]
    fn test_custom_inverted_fails() {
        let period = AnalyticsTimePeriod::Custom {
            start: midnight(date(2024, 1, 9)),
            end: midnight(date(2024, 1, 3)),
        };
        assert!(matches!(
            period.resolve(now()),
            Err(TaskpulseError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_custom_dates_inclusive() {
        let period = AnalyticsTimePeriod::custom_dates(date(2024, 1, 1), date(2024, 1, 10));
        assert_eq!(period.resolve(now()).unwrap().duration_in_days(), 10);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(
            "last-30-days".parse::<AnalyticsTimePeriod>().unwrap(),
            AnalyticsTimePeriod::Last30Days
        );
        assert_eq!(
            "This Week".parse::<AnalyticsTimePeriod>().unwrap(),
            AnalyticsTimePeriod::ThisWeek
        );
        assert_eq!(
            "7d".parse::<AnalyticsTimePeriod>().unwrap(),
            AnalyticsTimePeriod::Last7Days
        );
        assert!("custom".parse::<AnalyticsTimePeriod>().is_err());
        assert!("fortnight".parse::<AnalyticsTimePeriod>().is_err());
    }
}
