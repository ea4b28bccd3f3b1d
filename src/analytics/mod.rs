//! Productivity analytics over task history.
//!
//! Everything here is a pure function of a task snapshot plus a range or
//! "now":
//! - Date ranges and symbolic periods
//! - Range summaries and per-day statistics
//! - Completion streaks
//! - Tag categories
//! - Hour-of-day and weekday histograms
//! - Completion-rate trends
//!
//! [`AnalyticsEngine`] wraps them behind a [`crate::tasks::TaskSource`].

pub mod category;
pub mod engine;
pub mod histogram;
pub mod period;
pub mod productivity;
pub mod range;
pub mod streak;
pub mod summary;
pub mod trend;
pub mod visualization;

pub use category::{categorize, CategoryAnalytics, UNCATEGORIZED};
pub use engine::AnalyticsEngine;
pub use histogram::{
    format_hour, hourly_productivity, peak_bucket, weekday_name, weekday_productivity,
    TimeOfDayBreakdown,
};
pub use period::AnalyticsTimePeriod;
pub use productivity::{productivity_metrics, ProductivityMetrics};
pub use range::DateRange;
pub use streak::{compute_streak, StreakInfo};
pub use summary::{daily_stats, summarize, AnalyticsSummary, DailyStats};
pub use trend::{completion_rate_trend, monthly_trend, weekly_trend};
pub use visualization::{
    render_bar_chart, render_histogram_sparkline, render_rate_sparkline, render_sparkline,
};
