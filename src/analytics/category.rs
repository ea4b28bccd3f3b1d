//! Tag-based category breakdown.

use std::collections::BTreeMap;

use serde::Serialize;

use super::range::DateRange;
use super::summary::{mean, ratio, tasks_in_range};
use crate::tasks::TaskSnapshot;

/// Name of the bucket holding tasks without tags.
pub const UNCATEGORIZED: &str = "Uncategorized";
const UNCATEGORIZED_ID: &str = "uncategorized";

/// Per-category statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAnalytics {
    pub category_name: String,
    pub category_id: String,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub pending_tasks: usize,
    pub completion_rate: f64,
    pub average_duration: f64,
    /// Task count per priority label
    pub priority_distribution: BTreeMap<String, usize>,
}

impl CategoryAnalytics {
    #[must_use]
    pub fn is_uncategorized(&self) -> bool {
        self.category_id == UNCATEGORIZED_ID
    }
}

#[derive(Default)]
struct Bucket {
    total: usize,
    completed: usize,
    pending: usize,
    durations: Vec<f64>,
    priorities: BTreeMap<String, usize>,
}

impl Bucket {
    fn add(&mut self, task: &TaskSnapshot) {
        self.total += 1;
        if task.is_completed() {
            self.completed += 1;
        } else if task.status.is_open() {
            self.pending += 1;
        }
        if let Some(duration) = task.completed_duration() {
            self.durations.push(duration);
        }
        *self
            .priorities
            .entry(task.priority.label().to_string())
            .or_insert(0) += 1;
    }

    fn into_analytics(self, name: &str, id: String) -> CategoryAnalytics {
        CategoryAnalytics {
            category_name: name.to_string(),
            category_id: id,
            total_tasks: self.total,
            completed_tasks: self.completed,
            pending_tasks: self.pending,
            completion_rate: ratio(self.completed, self.total),
            average_duration: mean(&self.durations),
            priority_distribution: self.priorities,
        }
    }
}

/// Group in-range tasks by tag.
///
/// Tasks with several tags land in several categories; untagged tasks are
/// collected in a single [`UNCATEGORIZED`] entry. The result is ordered by
/// task count (descending), then name. Nothing is truncated.
#[must_use]
pub fn categorize(tasks: &[TaskSnapshot], range: &DateRange) -> Vec<CategoryAnalytics> {
    let mut by_tag: BTreeMap<&str, Bucket> = BTreeMap::new();
    let mut uncategorized: Option<Bucket> = None;

    for task in tasks_in_range(tasks, range) {
        if task.tags.is_empty() {
            uncategorized.get_or_insert_with(Bucket::default).add(task);
        } else {
            for tag in &task.tags {
                by_tag.entry(tag.as_str()).or_default().add(task);
            }
        }
    }

    let mut categories: Vec<CategoryAnalytics> = by_tag
        .into_iter()
        .map(|(tag, bucket)| bucket.into_analytics(tag, format!("tag:{tag}")))
        .collect();

    if let Some(bucket) = uncategorized {
        categories.push(bucket.into_analytics(UNCATEGORIZED, UNCATEGORIZED_ID.to_string()));
    }

    categories.sort_by(|a, b| {
        b.total_tasks
            .cmp(&a.total_tasks)
            .then_with(|| a.category_name.cmp(&b.category_name))
    });

    categories
}
