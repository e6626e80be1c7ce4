//! Application state container.
//!
//! [`AppState`] owns the database handle and a reloadable in-memory cache of
//! every collection. Mutators perform exactly one store call and then reload
//! the full cache; there is no optimistic update or partial patch. A failing
//! store call is logged and the action no-ops, leaving the cached state
//! untouched. Filter fields are independently settable and feed the derived
//! [`AppState::filtered_todos`] accessor.

use crate::db::categories::{Categories, Category};
use crate::db::db::Db;
use crate::db::settings::{Settings, UserSettings};
use crate::db::stats::{DayStats, Stats};
use crate::db::tasks::Tasks;
use crate::db::templates::{TaskTemplate, Templates};
use crate::libs::filter::{day_schedule, filter_tasks, DaySchedule, TaskCriteria};
use crate::libs::rollup;
use crate::libs::task::Task;
use crate::msg_error;
use anyhow::Result;
use chrono::{Duration, Local, NaiveDate};

/// Days of statistics kept in the cached trailing window.
pub const STATS_WINDOW_DAYS: i64 = 7;

/// Process-wide reactive cache between the record store and presentation.
pub struct AppState {
    db: Db,
    pub todos: Vec<Task>,
    pub categories: Vec<Category>,
    pub templates: Vec<TaskTemplate>,
    pub settings: UserSettings,
    pub stats_window: Vec<DayStats>,
    pub criteria: TaskCriteria,
}

impl AppState {
    /// Opens the store and performs the initial bulk load.
    pub fn new() -> Result<Self> {
        Self::with_db(Db::new()?)
    }

    /// Builds the container around an already-open handle.
    pub fn with_db(db: Db) -> Result<Self> {
        let mut state = Self {
            db,
            todos: Vec::new(),
            categories: Vec::new(),
            templates: Vec::new(),
            settings: UserSettings::default(),
            stats_window: Vec::new(),
            criteria: TaskCriteria::default(),
        };
        state.load_data()?;
        Ok(state)
    }

    /// Bulk-reloads all five collections plus the trailing statistics window.
    pub fn load_data(&mut self) -> Result<()> {
        self.todos = Tasks::new(&self.db).get_all()?;
        self.categories = Categories::new(&self.db).list()?;
        self.templates = Templates::new(&self.db).list()?;
        self.settings = Settings::new(&self.db).get()?;

        let today = Local::now().date_naive();
        let from = today - Duration::days(STATS_WINDOW_DAYS - 1);
        self.stats_window = Stats::new(&self.db).range(from, today)?;
        Ok(())
    }

    /// The cached task list with the active filter criteria applied.
    pub fn filtered_todos(&self) -> Vec<Task> {
        filter_tasks(&self.todos, &self.criteria)
    }

    /// Calendar bucketing of the cached tasks for one day.
    pub fn schedule_for(&self, date: NaiveDate) -> DaySchedule {
        day_schedule(&self.todos, date)
    }

    pub fn db(&self) -> &Db {
        &self.db
    }

    // === Task mutators ===

    pub fn add_todo(&mut self, task: &Task) -> Result<Option<i64>> {
        self.apply_with(|db| Tasks::new(db).insert(task))
    }

    pub fn update_todo(&mut self, task: &Task) -> Result<()> {
        self.apply(|db| Tasks::new(db).update(task))
    }

    pub fn delete_todo(&mut self, id: i64) -> Result<()> {
        self.apply(|db| Tasks::new(db).delete(id))
    }

    pub fn delete_all_todos(&mut self) -> Result<()> {
        self.apply(|db| Tasks::new(db).delete_all().map(|_| ()))
    }

    pub fn toggle_completion(&mut self, id: i64, completed: bool) -> Result<()> {
        self.apply(|db| Tasks::new(db).set_completed(id, completed))
    }

    // === Subtask / note / tracking mutators ===

    pub fn add_subtask(&mut self, task_id: i64, text: &str) -> Result<Option<i64>> {
        self.apply_with(|db| Tasks::new(db).add_subtask(task_id, text))
    }

    pub fn toggle_subtask(&mut self, subtask_id: i64, done: bool) -> Result<()> {
        self.apply(|db| Tasks::new(db).set_subtask_done(subtask_id, done))
    }

    pub fn remove_subtask(&mut self, subtask_id: i64) -> Result<()> {
        self.apply(|db| Tasks::new(db).delete_subtask(subtask_id))
    }

    pub fn add_note(&mut self, task_id: i64, content: &str) -> Result<Option<i64>> {
        self.apply_with(|db| Tasks::new(db).add_note(task_id, content))
    }

    pub fn update_note(&mut self, note_id: i64, content: &str) -> Result<()> {
        self.apply(|db| Tasks::new(db).update_note(note_id, content))
    }

    pub fn remove_note(&mut self, note_id: i64) -> Result<()> {
        self.apply(|db| Tasks::new(db).delete_note(note_id))
    }

    pub fn start_tracking(&mut self, task_id: i64) -> Result<()> {
        self.apply(|db| Tasks::new(db).start_tracking(task_id))
    }

    /// Stops tracking; returns the accumulated seconds on success.
    pub fn stop_tracking(&mut self, task_id: i64) -> Result<Option<i64>> {
        self.apply_with(|db| Tasks::new(db).stop_tracking(task_id))
    }

    // === Category / template / settings mutators ===

    pub fn add_category(&mut self, category: &Category) -> Result<()> {
        self.apply(|db| Categories::new(db).create(category).map(|_| ()))
    }

    pub fn update_category(&mut self, category: &Category) -> Result<()> {
        self.apply(|db| Categories::new(db).update(category))
    }

    /// Deletes a category; returns the number of cleared task references.
    pub fn delete_category(&mut self, id: i64) -> Result<Option<usize>> {
        self.apply_with(|db| Categories::new(db).delete(id))
    }

    pub fn add_template(&mut self, template: &TaskTemplate) -> Result<()> {
        self.apply(|db| Templates::new(db).create(template).map(|_| ()))
    }

    pub fn update_template(&mut self, template: &TaskTemplate) -> Result<()> {
        self.apply(|db| Templates::new(db).update(template))
    }

    pub fn delete_template(&mut self, name: &str) -> Result<()> {
        let owned = name.to_string();
        self.apply(move |db| Templates::new(db).delete(&owned))
    }

    pub fn update_settings(&mut self, settings: &UserSettings) -> Result<()> {
        self.apply(|db| Settings::new(db).save(settings))
    }

    /// Recomputes today's statistics row and refreshes the cached window.
    pub fn recompute_stats(&mut self) -> Result<()> {
        self.apply(|db| rollup::recompute_today(db).map(|_| ()))
    }

    /// Runs one store call; on success reloads the cache, on failure logs and
    /// leaves the cached state untouched.
    fn apply<F>(&mut self, op: F) -> Result<()>
    where
        F: FnOnce(&Db) -> Result<()>,
    {
        self.apply_with(op).map(|_| ())
    }

    /// Like [`AppState::apply`] but hands back the operation's value, or
    /// `None` when the store call failed and was swallowed.
    fn apply_with<T, F>(&mut self, op: F) -> Result<Option<T>>
    where
        F: FnOnce(&Db) -> Result<T>,
    {
        match op(&self.db) {
            Ok(value) => {
                self.load_data()?;
                Ok(Some(value))
            }
            Err(e) => {
                msg_error!(e);
                Ok(None)
            }
        }
    }
}
