//! Task filtering and calendar bucketing.
//!
//! Pure functions over an in-memory task list, no store access. Criteria are
//! independent and combined with logical AND; an empty criterion contributes
//! no constraint. Filtering never reorders: the relative order of the input
//! is preserved, which also makes `filter_tasks` idempotent for a fixed set
//! of criteria.

use crate::libs::task::{Priority, Task};
use chrono::{NaiveDate, NaiveTime, Timelike};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Length of one timed calendar slot.
pub const SLOT_MINUTES: u32 = 30;

/// Tri-state completion constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompletionFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl FromStr for CompletionFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(CompletionFilter::All),
            "active" => Ok(CompletionFilter::Active),
            "completed" | "done" => Ok(CompletionFilter::Completed),
            other => Err(other.to_string()),
        }
    }
}

/// The conjunction of filter predicates applied to the task list.
///
/// `None`, an empty string or an empty list mean "no constraint" for the
/// respective criterion.
#[derive(Debug, Clone, Default)]
pub struct TaskCriteria {
    /// Due date truncated to this calendar day. Tasks without a due date
    /// never match while this is set.
    pub date: Option<NaiveDate>,
    /// Task tags must be a superset of this set.
    pub tags: Vec<String>,
    /// Task category must be one of these.
    pub categories: Vec<i64>,
    /// Exact priority match.
    pub priority: Option<Priority>,
    /// Case-insensitive substring over title, description, tags and notes.
    pub search: String,
    pub completion: CompletionFilter,
}

impl TaskCriteria {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.tags.is_empty()
            && self.categories.is_empty()
            && self.priority.is_none()
            && self.search.is_empty()
            && self.completion == CompletionFilter::All
    }
}

/// Applies the criteria to the task list, preserving relative order.
pub fn filter_tasks(tasks: &[Task], criteria: &TaskCriteria) -> Vec<Task> {
    tasks.iter().filter(|task| matches(task, criteria)).cloned().collect()
}

fn matches(task: &Task, criteria: &TaskCriteria) -> bool {
    if let Some(date) = criteria.date {
        match task.due_day() {
            Some(due) if due == date => {}
            _ => return false,
        }
    }

    if !criteria.tags.is_empty() && !criteria.tags.iter().all(|tag| task.tags.contains(tag)) {
        return false;
    }

    if !criteria.categories.is_empty() {
        match task.category_id {
            Some(id) if criteria.categories.contains(&id) => {}
            _ => return false,
        }
    }

    if let Some(priority) = criteria.priority {
        if task.priority != priority {
            return false;
        }
    }

    if !criteria.search.is_empty() && !matches_text(task, &criteria.search) {
        return false;
    }

    match criteria.completion {
        CompletionFilter::All => true,
        CompletionFilter::Active => !task.completed,
        CompletionFilter::Completed => task.completed,
    }
}

fn matches_text(task: &Task, query: &str) -> bool {
    let query = query.to_lowercase();
    task.title.to_lowercase().contains(&query)
        || task.description.to_lowercase().contains(&query)
        || task.tags.iter().any(|tag| tag.to_lowercase().contains(&query))
        || task.notes.iter().any(|note| note.content.to_lowercase().contains(&query))
}

/// One day of tasks bucketed for calendar rendering.
///
/// A task due at exactly midnight carries no meaningful time component and
/// lands in the all-day bucket; everything else goes into the half-hour slot
/// its due time falls in.
#[derive(Debug, Clone, Default)]
pub struct DaySchedule {
    pub all_day: Vec<Task>,
    pub slots: BTreeMap<NaiveTime, Vec<Task>>,
}

/// Buckets the tasks due on `date` into the day schedule.
pub fn day_schedule(tasks: &[Task], date: NaiveDate) -> DaySchedule {
    let mut schedule = DaySchedule::default();

    for task in tasks {
        let Some(due) = task.due_date else { continue };
        if due.date() != date {
            continue;
        }

        let time = due.time();
        if time == NaiveTime::MIN {
            schedule.all_day.push(task.clone());
        } else {
            schedule.slots.entry(slot_start(time)).or_default().push(task.clone());
        }
    }

    schedule
}

/// Truncates a time to the start of its half-hour slot.
pub fn slot_start(time: NaiveTime) -> NaiveTime {
    let minute = time.minute() - time.minute() % SLOT_MINUTES;
    NaiveTime::from_hms_opt(time.hour(), minute, 0).unwrap_or(NaiveTime::MIN)
}
