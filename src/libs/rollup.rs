//! Daily statistics builder.
//!
//! Derives the per-day completion rollup from the full task collection and
//! writes it through the stats repository. Every call is a full O(n) rescan;
//! there is no incremental path, which is acceptable at the data volumes a
//! single user produces.

use crate::db::db::Db;
use crate::db::stats::{DayStats, Stats, Tally};
use crate::db::tasks::Tasks;
use crate::libs::task::Task;
use anyhow::Result;
use chrono::{Local, NaiveDate};

/// Builds the rollup for one day from a task snapshot.
///
/// `completed` counts tasks whose completion timestamp falls on `day`,
/// regardless of when they were due. `total` and the per-category/per-tag
/// tallies are restricted to tasks due on `day`.
pub fn build_for_day(tasks: &[Task], day: NaiveDate) -> DayStats {
    let mut stats = DayStats::empty(day);

    for task in tasks {
        if task.completed_at.is_some_and(|at| at.date() == day) {
            stats.completed += 1;
        }

        if task.due_day() != Some(day) {
            continue;
        }
        stats.total += 1;

        let done = task.completed;
        if let Some(category_id) = task.category_id {
            let tally = stats.by_category.entry(category_id.to_string()).or_insert_with(Tally::default);
            bump(tally, done);
        }
        for tag in &task.tags {
            let tally = stats.by_tag.entry(tag.clone()).or_insert_with(Tally::default);
            bump(tally, done);
        }
    }

    stats
}

fn bump(tally: &mut Tally, done: bool) {
    tally.total += 1;
    if done {
        tally.completed += 1;
    }
}

/// Rescans the task collection and upserts today's statistics row.
pub fn recompute_today(db: &Db) -> Result<DayStats> {
    let today = Local::now().date_naive();
    let tasks = Tasks::new(db).get_all()?;
    let stats = build_for_day(&tasks, today);
    Stats::new(db).upsert(&stats)?;
    Ok(stats)
}
