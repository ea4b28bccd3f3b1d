//! Terminal visualization for analytics results.
//!
//! Provides sparklines and horizontal bar charts.

use std::collections::BTreeMap;

/// Characters for sparkline rendering.
const BAR_CHARS: [char; 8] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇'];
const FULL_BLOCK: char = '█';

/// Render a horizontal bar chart of `(label, value)` pairs.
///
/// Labels longer than `label_width` are truncated with an ellipsis.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn render_bar_chart(data: &[(String, usize)], label_width: usize, bar_width: usize) -> String {
    if data.is_empty() {
        return String::new();
    }

    let max_value = data.iter().map(|(_, v)| *v).max().unwrap_or(1).max(1);

    data.iter()
        .map(|(label, value)| {
            let label = if label.chars().count() > label_width && label_width > 3 {
                let cut: String = label.chars().take(label_width - 3).collect();
                format!("{cut}...")
            } else {
                format!("{label:label_width$}")
            };

            let bar_length = (*value as f64 / max_value as f64 * bar_width as f64) as usize;
            let bar = FULL_BLOCK.to_string().repeat(bar_length);
            let padding = " ".repeat(bar_width.saturating_sub(bar_length));

            format!("{label} |{bar}{padding} {value}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render counts as a single-line sparkline.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn render_sparkline(values: &[usize]) -> String {
    let max_value = values.iter().max().copied().unwrap_or(1).max(1);

    values
        .iter()
        .map(|&v| {
            if v == 0 {
                BAR_CHARS[0]
            } else {
                let level = (v as f64 / max_value as f64 * 7.0) as usize;
                BAR_CHARS[level.clamp(1, 7)]
            }
        })
        .collect()
}

/// Render rates in `[0, 1]` as a sparkline on a fixed scale.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn render_rate_sparkline(rates: &[f64]) -> String {
    rates
        .iter()
        .map(|&rate| {
            if rate <= 0.0 {
                BAR_CHARS[0]
            } else {
                let level = (rate.min(1.0) * 7.0).round() as usize;
                BAR_CHARS[level.clamp(1, 7)]
            }
        })
        .collect()
}

/// Render a histogram's values, in key order, as a sparkline.
#[must_use]
pub fn render_histogram_sparkline(histogram: &BTreeMap<u32, usize>) -> String {
    let values: Vec<usize> = histogram.values().copied().collect();
    render_sparkline(&values)
}
