use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::analytics::range::midnight;
use crate::analytics::AnalyticsTimePeriod;
use crate::error::TaskpulseError;

#[derive(Parser, Debug)]
#[command(name = "taskpulse")]
#[command(about = "Productivity analytics for your task history")]
#[command(long_about = "taskpulse - productivity analytics for task history

Summaries, completion streaks, tag categories, time-of-day patterns and
completion-rate trends computed from a snapshot of your tasks.

QUICK START:
  taskpulse import tasks.json          Load a JSON export into the local store
  taskpulse summary --period this-week Summary of the current week
  taskpulse streak                     Current and longest completion streaks
  taskpulse trend --interval 7         Weekly completion-rate trend

TASK SOURCES:
  --tasks <file.json>   Read a JSON array of tasks
  --db <file.db>        Read a SQLite task store
  Otherwise the source configured in ~/.taskpulse/config.yaml is used.

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Defaults to `general.default_output` from the config file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Read tasks from a JSON file
    #[arg(long, value_name = "FILE", global = true, conflicts_with = "db")]
    pub tasks: Option<PathBuf>,

    /// Read tasks from a SQLite database
    #[arg(long, value_name = "FILE", global = true)]
    pub db: Option<PathBuf>,

    /// Use an alternative config file
    #[arg(long, value_name = "FILE", global = true, env = "TASKPULSE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Evaluate as if the current local time were this (YYYY-MM-DDTHH:MM:SS)
    #[arg(long, value_name = "DATETIME", global = true, value_parser = parse_now)]
    pub now: Option<NaiveDateTime>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summary of a period
    ///
    /// Totals, completion rate, streaks and breakdowns by priority, status,
    /// tag and project, followed by per-day statistics.
    #[command(alias = "s")]
    Summary(PeriodArgs),

    /// Weekly and monthly productivity metrics
    ///
    /// Completion rates for this week and month, trends, histograms and
    /// averages over the past 30 days.
    #[command(alias = "p")]
    Productivity,

    /// Current and longest completion streaks
    Streak,

    /// Per-tag breakdown of a period
    #[command(alias = "tags")]
    Categories {
        #[command(flatten)]
        period: PeriodArgs,

        /// Show at most this many categories
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Per-day statistics for a period
    Daily(PeriodArgs),

    /// Completions by hour of day
    Hourly(PeriodArgs),

    /// Completions by day of week
    Weekday(PeriodArgs),

    /// Completion-rate trend over a period
    Trend {
        #[command(flatten)]
        period: PeriodArgs,

        /// Window length in days
        #[arg(short, long)]
        interval: Option<i64>,
    },

    /// Import a JSON task file into the SQLite store
    ///
    /// Tasks are inserted or replaced by id.
    Import {
        /// JSON array of tasks
        file: PathBuf,
    },
}

/// Period selection shared by the range-based commands.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct PeriodArgs {
    /// Named period
    #[arg(short, long, value_enum)]
    pub period: Option<PeriodArg>,

    /// First day of a custom range (inclusive)
    #[arg(long, value_name = "YYYY-MM-DD", requires = "to")]
    pub from: Option<NaiveDate>,

    /// Last day of a custom range (inclusive)
    #[arg(long, value_name = "YYYY-MM-DD", requires = "from")]
    pub to: Option<NaiveDate>,
}

/// Period names accepted on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PeriodArg {
    Today,
    #[value(alias = "week")]
    ThisWeek,
    #[value(alias = "month")]
    ThisMonth,
    #[value(alias = "year")]
    ThisYear,
    #[value(name = "last-7-days", alias = "7d")]
    Last7Days,
    #[value(name = "last-30-days", alias = "30d")]
    Last30Days,
    #[value(name = "last-90-days", alias = "90d")]
    Last90Days,
    /// Requires --from and --to
    Custom,
}

impl PeriodArgs {
    /// Turn the flags into a period, falling back to `default`.
    ///
    /// `--from/--to` alone imply a custom range.
    ///
    /// # Errors
    ///
    /// Returns `TaskpulseError::InvalidRange` if `--from` is after `--to`, or
    /// `TaskpulseError::Config` for `--period custom` without dates or dates
    /// combined with a named period.
    pub fn resolve(
        &self,
        default: AnalyticsTimePeriod,
    ) -> Result<AnalyticsTimePeriod, TaskpulseError> {
        match (self.period, self.from, self.to) {
            (None | Some(PeriodArg::Custom), Some(from), Some(to)) => {
                if from > to {
                    return Err(TaskpulseError::InvalidRange {
                        start: midnight(from),
                        end: midnight(to),
                    });
                }
                Ok(AnalyticsTimePeriod::custom_dates(from, to))
            },
            (Some(PeriodArg::Custom), _, _) => Err(TaskpulseError::Config(
                "--period custom requires --from and --to".to_string(),
            )),
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => Err(TaskpulseError::Config(
                "--from/--to can only be combined with --period custom".to_string(),
            )),
            (Some(named), None, None) => Ok(named.into()),
            (None, _, _) => Ok(default),
        }
    }
}

impl From<PeriodArg> for AnalyticsTimePeriod {
    fn from(arg: PeriodArg) -> Self {
        match arg {
            PeriodArg::Today => Self::Today,
            PeriodArg::ThisWeek => Self::ThisWeek,
            PeriodArg::ThisMonth => Self::ThisMonth,
            PeriodArg::ThisYear => Self::ThisYear,
            PeriodArg::Last7Days => Self::Last7Days,
            // Custom without bounds is rejected in PeriodArgs::resolve
            PeriodArg::Last30Days | PeriodArg::Custom => Self::Last30Days,
            PeriodArg::Last90Days => Self::Last90Days,
        }
    }
}

fn parse_now(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S"))
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d").map(midnight))
        .map_err(|e| format!("invalid date/time '{value}': {e}"))
}
