//! Core task domain types.
//!
//! A [`Task`] is the central record of the application: a unit of work with
//! scheduling metadata (due/start/end timestamps), organizational metadata
//! (tags, category, priority), owned child collections (subtasks, notes), an
//! optional descriptive recurrence rule and an optional time tracking record.
//!
//! Once a task has passed through the store, its collection fields are
//! normalized: `tags`, `subtasks` and `notes` are always present (empty when
//! unset) and `description` defaults to an empty string.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Task priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(other.to_string()),
        }
    }
}

/// Repetition pattern kind for a recurrence rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceKind {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Custom,
}

impl FromStr for RecurrenceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(RecurrenceKind::None),
            "daily" => Ok(RecurrenceKind::Daily),
            "weekly" => Ok(RecurrenceKind::Weekly),
            "monthly" => Ok(RecurrenceKind::Monthly),
            "yearly" => Ok(RecurrenceKind::Yearly),
            "custom" => Ok(RecurrenceKind::Custom),
            other => Err(other.to_string()),
        }
    }
}

/// Descriptive repetition rule attached to a task.
///
/// Purely informational: no background job materializes future occurrences.
/// Weekdays are stored as 0..=6 counting from Monday and only apply to weekly
/// rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    pub kind: RecurrenceKind,
    pub interval: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weekdays: Vec<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

impl RecurrenceRule {
    pub fn new(kind: RecurrenceKind) -> Self {
        Self {
            kind,
            interval: 1,
            weekdays: Vec::new(),
            until: None,
            count: None,
        }
    }
}

/// A checklist item owned exclusively by its parent task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: Option<i64>,
    pub text: String,
    pub done: bool,
}

impl Subtask {
    pub fn new(text: &str) -> Self {
        Self {
            id: None,
            text: text.to_string(),
            done: false,
        }
    }
}

/// A free-form annotation owned exclusively by its parent task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: Option<i64>,
    pub content: String,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl Note {
    pub fn new(content: &str) -> Self {
        Self {
            id: None,
            content: content.to_string(),
            created_at: None,
            updated_at: None,
        }
    }
}

/// Per-task time tracking record.
///
/// `started_at` is set while the clock is running and cleared into
/// `accumulated_secs` on stop. `stopped_at` remembers the last stop time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeTracking {
    pub started_at: Option<NaiveDateTime>,
    pub stopped_at: Option<NaiveDateTime>,
    pub accumulated_secs: i64,
}

impl TimeTracking {
    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }
}

/// A user-owned unit of work with scheduling, categorization and tracking
/// metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Option<i64>,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: Option<NaiveDateTime>,
    pub due_date: Option<NaiveDateTime>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub tags: Vec<String>,
    pub priority: Priority,
    pub recurrence: Option<RecurrenceRule>,
    pub subtasks: Vec<Subtask>,
    pub notes: Vec<Note>,
    pub parent_id: Option<i64>,
    pub category_id: Option<i64>,
    pub completed_at: Option<NaiveDateTime>,
    pub tracking: Option<TimeTracking>,
}

impl Task {
    pub fn new(title: &str) -> Self {
        Task {
            id: None,
            title: title.to_string(),
            description: String::new(),
            completed: false,
            created_at: None,
            due_date: None,
            start_date: None,
            end_date: None,
            tags: Vec::new(),
            priority: Priority::default(),
            recurrence: None,
            subtasks: Vec::new(),
            notes: Vec::new(),
            parent_id: None,
            category_id: None,
            completed_at: None,
            tracking: None,
        }
    }

    /// Returns the calendar day of the due date, if any.
    pub fn due_day(&self) -> Option<NaiveDate> {
        self.due_date.map(|dt| dt.date())
    }
}
