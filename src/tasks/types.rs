use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::analytics::DateRange;

/// A read-only snapshot of a single task as handed over by the task store.
///
/// Timestamps are local wall-clock times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSnapshot {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub completed_at: Option<NaiveDateTime>,
    /// Time actually spent on the task, in minutes.
    #[serde(default)]
    pub actual_duration: Option<f64>,
}

impl TaskSnapshot {
    /// Create a pending task with medium priority and no tags.
    #[must_use]
    pub fn new(id: impl Into<String>, created_at: NaiveDateTime) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            status: TaskStatus::Pending,
            priority: Priority::Medium,
            tags: BTreeSet::new(),
            project_id: None,
            created_at,
            completed_at: None,
            actual_duration: None,
        }
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Completion timestamp, only for tasks whose status is completed.
    #[must_use]
    pub fn completion_time(&self) -> Option<NaiveDateTime> {
        if self.is_completed() {
            self.completed_at
        } else {
            None
        }
    }

    /// A task is in range when it was created or completed inside it.
    #[must_use]
    pub fn is_in_range(&self, range: &DateRange) -> bool {
        range.contains(self.created_at) || self.completed_at.is_some_and(|t| range.contains(t))
    }

    /// Whether the task was completed inside the range.
    #[must_use]
    pub fn completed_within(&self, range: &DateRange) -> bool {
        self.completion_time().is_some_and(|t| range.contains(t))
    }

    /// Recorded duration for completed tasks; negative values are ignored.
    #[must_use]
    pub fn completed_duration(&self) -> Option<f64> {
        if !self.is_completed() {
            return None;
        }
        self.actual_duration.filter(|d| d.is_finite() && *d >= 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl TaskStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "inProgress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Pending and in-progress tasks are both still open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }

    /// Parse a stored status label.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "inProgress" | "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            "cancelled" | "canceled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Urgent];

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.label() == value)
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
