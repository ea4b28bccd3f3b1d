use std::collections::BTreeMap;
use std::path::Path;

use chrono::Duration;
use colored::Colorize;

use crate::analytics::{
    format_hour, peak_bucket, render_bar_chart, render_histogram_sparkline,
    render_rate_sparkline, render_sparkline, weekday_name, AnalyticsSummary,
    AnalyticsTimePeriod, CategoryAnalytics, DailyStats, DateRange, ProductivityMetrics,
    StreakInfo, TimeOfDayBreakdown,
};
use crate::tasks::{Priority, TaskStatus};

const RULE_WIDTH: usize = 50;
const LABEL_WIDTH: usize = 16;
const BAR_WIDTH: usize = 30;

fn percent(rate: f64) -> String {
    format!("{:.0}%", rate * 100.0)
}

fn colored_rate(rate: f64) -> String {
    let text = percent(rate);
    if rate >= 0.75 {
        text.green().to_string()
    } else if rate >= 0.4 {
        text.yellow().to_string()
    } else {
        text.red().to_string()
    }
}

fn days(count: usize) -> String {
    if count == 1 {
        "1 day".to_string()
    } else {
        format!("{count} days")
    }
}

fn header(output: &mut Vec<String>, title: &str) {
    output.push(title.bold().to_string());
    output.push("─".repeat(RULE_WIDTH));
}

fn priority_line(by_priority: &BTreeMap<Priority, usize>) -> String {
    Priority::ALL
        .iter()
        .rev()
        .map(|p| format!("{} {}", p.label(), by_priority.get(p).copied().unwrap_or(0)))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Format a period summary
#[must_use]
pub fn format_summary_pretty(summary: &AnalyticsSummary, period: &AnalyticsTimePeriod) -> String {
    let mut output = Vec::new();

    header(&mut output, &format!("📊 Summary: {}", period.label()));
    output.push(
        format!(
            "{} .. {}",
            summary.start_date.format("%Y-%m-%d %H:%M"),
            summary.end_date.format("%Y-%m-%d %H:%M")
        )
        .dimmed()
        .to_string(),
    );

    if summary.total_tasks == 0 {
        output.push("  No tasks in this period".to_string());
        return output.join("\n");
    }

    output.push(format!("Total tasks:     {}", summary.total_tasks));
    output.push(format!(
        "Completed:       {} ({})",
        summary.completed_tasks.to_string().green(),
        colored_rate(summary.completion_rate)
    ));
    output.push(format!("Pending:         {}", summary.pending_tasks));
    output.push(format!("Cancelled:       {}", summary.cancelled_tasks));
    if summary.average_task_duration > 0.0 {
        output.push(format!(
            "Avg duration:    {:.0} min",
            summary.average_task_duration
        ));
    }
    output.push(format!(
        "Streak:          {} (longest {})",
        days(summary.current_streak),
        days(summary.longest_streak)
    ));
    output.push(String::new());

    header(&mut output, "By priority");
    output.push(format!("  {}", priority_line(&summary.tasks_by_priority)));
    output.push(String::new());

    header(&mut output, "By status");
    let statuses = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::Cancelled,
    ];
    output.push(format!(
        "  {}",
        statuses
            .iter()
            .map(|s| format!("{s} {}", summary.tasks_by_status.get(s).copied().unwrap_or(0)))
            .collect::<Vec<_>>()
            .join("  ")
    ));

    if !summary.tasks_by_tag.is_empty() {
        output.push(String::new());
        header(&mut output, "By tag");
        let data: Vec<(String, usize)> = summary
            .tasks_by_tag
            .iter()
            .map(|(tag, count)| (format!("#{tag}"), *count))
            .collect();
        output.push(render_bar_chart(&data, LABEL_WIDTH, BAR_WIDTH));
    }

    if !summary.tasks_by_project.is_empty() {
        output.push(String::new());
        header(&mut output, "By project");
        let data: Vec<(String, usize)> = summary
            .tasks_by_project
            .iter()
            .map(|(project, count)| (project.clone(), *count))
            .collect();
        output.push(render_bar_chart(&data, LABEL_WIDTH, BAR_WIDTH));
    }

    if summary.daily_stats.len() > 1 {
        output.push(String::new());
        let completed: Vec<usize> = summary
            .daily_stats
            .iter()
            .map(|d| d.completed_tasks)
            .collect();
        output.push(format!("Completed per day: {}", render_sparkline(&completed)));
    }

    output.join("\n")
}

/// Format productivity metrics
#[must_use]
pub fn format_productivity_pretty(metrics: &ProductivityMetrics) -> String {
    let mut output = Vec::new();

    header(&mut output, "✅ COMPLETIONS");
    output.push(format!(
        "  This week:  {} ({} completion rate)",
        metrics.tasks_completed_this_week.to_string().green(),
        colored_rate(metrics.weekly_completion_rate)
    ));
    output.push(format!(
        "  This month: {} ({} completion rate)",
        metrics.tasks_completed_this_month.to_string().green(),
        colored_rate(metrics.monthly_completion_rate)
    ));
    output.push(format!(
        "  Average: {:.1}/day  Time to complete: {:.1}h",
        metrics.average_tasks_per_day, metrics.average_completion_time
    ));
    output.push(String::new());

    header(&mut output, "🔥 STREAK");
    let current = if metrics.current_streak > 0 {
        days(metrics.current_streak).green().to_string()
    } else {
        days(0).dimmed().to_string()
    };
    output.push(format!(
        "  Current: {current}  Longest: {}",
        days(metrics.longest_streak)
    ));
    output.push(String::new());

    header(&mut output, "📈 TRENDS");
    output.push(format!(
        "  Last 7 days:  {}",
        render_rate_sparkline(&metrics.weekly_trend)
    ));
    output.push(format!(
        "  Last 30 days: {}",
        render_rate_sparkline(&metrics.monthly_trend)
    ));
    output.push(String::new());

    header(&mut output, "⏰ PRODUCTIVITY PATTERNS");
    output.push(format!(
        "  Most productive day: {}",
        peak_bucket(&metrics.weekday_productivity)
            .map_or("-", weekday_name)
            .cyan()
    ));
    output.push(format!(
        "  Peak hour: {}",
        peak_bucket(&metrics.hourly_productivity)
            .map_or_else(|| "-".to_string(), format_hour)
            .cyan()
    ));
    output.push(format!("  {}", time_of_day_line(&metrics.hourly_productivity)));
    output.push(format!(
        "  By hour: {}",
        render_histogram_sparkline(&metrics.hourly_productivity)
    ));

    output.join("\n")
}

fn time_of_day_line(hourly: &BTreeMap<u32, usize>) -> String {
    let parts = TimeOfDayBreakdown::from_hourly(hourly);
    format!(
        "Morning: {}  Afternoon: {}  Evening: {}  Night: {}",
        parts.morning, parts.afternoon, parts.evening, parts.night
    )
}

/// Format streak information
#[must_use]
pub fn format_streak_pretty(streak: &StreakInfo) -> String {
    let mut output = Vec::new();

    header(&mut output, "🔥 Streak");

    let current = if streak.is_streak_active && streak.current_streak > 0 {
        days(streak.current_streak).green().bold().to_string()
    } else {
        days(0).dimmed().to_string()
    };
    output.push(format!("Current:         {current}"));
    output.push(format!("Longest:         {}", days(streak.longest_streak)));

    if let Some(start) = streak.streak_start_date {
        output.push(format!("Started:         {}", start.format("%Y-%m-%d")));
    }

    match streak.last_completion_date {
        Some(last) => output.push(format!("Last completion: {}", last.format("%Y-%m-%d"))),
        None => output.push(format!("Last completion: {}", "never".dimmed())),
    }

    if let Some(since) = streak.days_since_completion.filter(|d| *d > 1) {
        output.push(format!(
            "Days since last completion: {}",
            since.to_string().yellow()
        ));
    }

    output.push(format!(
        "Active days:     {}",
        streak.completion_dates.len()
    ));

    output.join("\n")
}

/// Format tag categories
#[must_use]
pub fn format_categories_pretty(categories: &[CategoryAnalytics], range: &DateRange) -> String {
    let mut output = Vec::new();

    header(
        &mut output,
        &format!("🏷  Categories ({} items)", categories.len()),
    );
    output.push(range.to_string().dimmed().to_string());

    if categories.is_empty() {
        output.push("  No tasks in this period".to_string());
        return output.join("\n");
    }

    for category in categories {
        let name = if category.is_uncategorized() {
            category.category_name.dimmed().to_string()
        } else {
            format!("#{}", category.category_name).cyan().to_string()
        };
        let mut line = format!(
            "{name}  {}/{} done ({})",
            category.completed_tasks,
            category.total_tasks,
            colored_rate(category.completion_rate)
        );
        if category.pending_tasks > 0 {
            line.push_str(&format!("  {} pending", category.pending_tasks));
        }
        if category.average_duration > 0.0 {
            line.push_str(&format!("  avg {:.0} min", category.average_duration));
        }
        output.push(line);
    }

    output.push(String::new());
    let data: Vec<(String, usize)> = categories
        .iter()
        .map(|c| (c.category_name.clone(), c.total_tasks))
        .collect();
    output.push(render_bar_chart(&data, LABEL_WIDTH, BAR_WIDTH));

    output.join("\n")
}

/// Format per-day statistics as a table
#[must_use]
pub fn format_daily_pretty(days: &[DailyStats]) -> String {
    let mut output = Vec::new();

    header(&mut output, &format!("📅 Daily ({} days)", days.len()));
    output.push(
        format!(
            "{:<12} {:>7} {:>9} {:>6} {:>8}",
            "Date", "Created", "Completed", "Rate", "Minutes"
        )
        .dimmed()
        .to_string(),
    );

    for day in days {
        output.push(format!(
            "{:<12} {:>7} {:>9} {:>6} {:>8.0}",
            day.date.format("%a %b %d").to_string(),
            day.created_tasks,
            day.completed_tasks,
            percent(day.completion_rate),
            day.total_duration
        ));
    }

    if days.len() > 1 {
        output.push(String::new());
        let completed: Vec<usize> = days.iter().map(|d| d.completed_tasks).collect();
        output.push(format!("Completed: {}", render_sparkline(&completed)));
    }

    output.join("\n")
}

/// Format the hour-of-day histogram
#[must_use]
pub fn format_hourly_pretty(hours: &BTreeMap<u32, usize>, range: &DateRange) -> String {
    let mut output = Vec::new();

    header(&mut output, "⏰ Completions by hour");
    output.push(range.to_string().dimmed().to_string());

    let data: Vec<(String, usize)> = hours
        .iter()
        .map(|(hour, count)| (format_hour(*hour), *count))
        .collect();
    output.push(render_bar_chart(&data, 5, BAR_WIDTH));
    output.push(String::new());

    match peak_bucket(hours) {
        Some(hour) => output.push(format!("Peak hour: {}", format_hour(hour).cyan())),
        None => output.push("No completions in this period".dimmed().to_string()),
    }
    output.push(time_of_day_line(hours));

    output.join("\n")
}

/// Format the weekday histogram
#[must_use]
pub fn format_weekday_pretty(weekdays: &BTreeMap<u32, usize>, range: &DateRange) -> String {
    let mut output = Vec::new();

    header(&mut output, "📆 Completions by weekday");
    output.push(range.to_string().dimmed().to_string());

    let data: Vec<(String, usize)> = weekdays
        .iter()
        .map(|(day, count)| (weekday_name(*day).to_string(), *count))
        .collect();
    output.push(render_bar_chart(&data, 9, BAR_WIDTH));
    output.push(String::new());

    match peak_bucket(weekdays) {
        Some(day) => output.push(format!("Most productive day: {}", weekday_name(day).cyan())),
        None => output.push("No completions in this period".dimmed().to_string()),
    }

    output.join("\n")
}

/// Format a completion-rate trend, one line per window
#[must_use]
pub fn format_trend_pretty(rates: &[f64], range: &DateRange, interval_days: i64) -> String {
    let mut output = Vec::new();

    let unit = if interval_days == 1 {
        "day".to_string()
    } else {
        format!("{interval_days} days")
    };
    header(&mut output, &format!("📈 Completion rate per {unit}"));
    output.push(range.to_string().dimmed().to_string());

    if rates.is_empty() {
        output.push("  Empty range".to_string());
        return output.join("\n");
    }

    output.push(format!("  {}", render_rate_sparkline(rates)));
    output.push(String::new());

    let first = range.start().date();
    for (i, rate) in (0_i64..).zip(rates) {
        let window_start = first + Duration::days(i * interval_days);
        output.push(format!(
            "  {}  {:>4}",
            window_start.format("%Y-%m-%d"),
            colored_rate(*rate)
        ));
    }

    output.join("\n")
}

/// Format an import result
#[must_use]
pub fn format_import_pretty(imported: usize, database: &Path) -> String {
    format!(
        "{} Imported {} tasks into {}",
        "✓".green(),
        imported.to_string().bold(),
        database.display()
    )
}
