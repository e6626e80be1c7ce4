#[cfg(test)]
mod tests {
    use chrono::{Local, NaiveTime};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use tudu::db::categories::Category;
    use tudu::db::db::Db;
    use tudu::db::settings::UserSettings;
    use tudu::db::templates::{TaskSeed, TaskTemplate};
    use tudu::libs::filter::{CompletionFilter, TaskCriteria};
    use tudu::libs::state::AppState;
    use tudu::libs::task::{Priority, Task};

    struct StateTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for StateTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            StateTestContext { _temp_dir: temp_dir }
        }
    }

    fn state() -> AppState {
        AppState::with_db(Db::new_in_memory().unwrap()).unwrap()
    }

    #[test_context(StateTestContext)]
    #[test]
    fn test_initial_load_is_empty(_ctx: &mut StateTestContext) {
        let state = state();
        assert!(state.todos.is_empty());
        assert!(state.categories.is_empty());
        assert!(state.templates.is_empty());
        assert_eq!(state.settings, UserSettings::default());
    }

    #[test_context(StateTestContext)]
    #[test]
    fn test_add_todo_reloads_cache(_ctx: &mut StateTestContext) {
        let mut state = state();

        let id = state.add_todo(&Task::new("Buy milk")).unwrap();
        assert!(id.is_some());
        assert_eq!(state.todos.len(), 1);
        assert_eq!(state.todos[0].title, "Buy milk");
        assert_eq!(state.todos[0].id, id);
    }

    #[test_context(StateTestContext)]
    #[test]
    fn test_failed_mutation_is_a_noop(_ctx: &mut StateTestContext) {
        let mut state = state();
        state.add_todo(&Task::new("Keeper")).unwrap();

        // Deleting a missing task logs the error and leaves the cache alone
        state.delete_todo(999).unwrap();
        assert_eq!(state.todos.len(), 1);
        assert_eq!(state.todos[0].title, "Keeper");
    }

    #[test_context(StateTestContext)]
    #[test]
    fn test_toggle_completion_round_trip(_ctx: &mut StateTestContext) {
        let mut state = state();
        let id = state.add_todo(&Task::new("Flip me")).unwrap().unwrap();

        state.toggle_completion(id, true).unwrap();
        assert!(state.todos[0].completed);
        assert!(state.todos[0].completed_at.is_some());

        state.toggle_completion(id, false).unwrap();
        assert!(!state.todos[0].completed);
        assert!(state.todos[0].completed_at.is_none());
    }

    #[test_context(StateTestContext)]
    #[test]
    fn test_filtered_todos_follows_criteria(_ctx: &mut StateTestContext) {
        let mut state = state();

        let mut urgent = Task::new("urgent");
        urgent.priority = Priority::High;
        state.add_todo(&urgent).unwrap();
        state.add_todo(&Task::new("normal")).unwrap();

        state.criteria = TaskCriteria {
            priority: Some(Priority::High),
            ..Default::default()
        };
        let filtered = state.filtered_todos();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "urgent");

        // The cache itself is untouched by filtering
        assert_eq!(state.todos.len(), 2);
    }

    #[test_context(StateTestContext)]
    #[test]
    fn test_active_filter_after_toggle(_ctx: &mut StateTestContext) {
        let mut state = state();
        let id = state.add_todo(&Task::new("flip")).unwrap().unwrap();
        state.add_todo(&Task::new("stay")).unwrap();

        state.criteria = TaskCriteria {
            completion: CompletionFilter::Active,
            ..Default::default()
        };
        assert_eq!(state.filtered_todos().len(), 2);

        state.toggle_completion(id, true).unwrap();
        let active = state.filtered_todos();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].title, "stay");
    }

    #[test_context(StateTestContext)]
    #[test]
    fn test_schedule_for_buckets_cached_tasks(_ctx: &mut StateTestContext) {
        let mut state = state();
        let today = Local::now().date_naive();

        let mut all_day = Task::new("all-day");
        all_day.due_date = today.and_hms_opt(0, 0, 0);
        state.add_todo(&all_day).unwrap();

        let mut timed = Task::new("timed");
        timed.due_date = today.and_hms_opt(9, 40, 0);
        state.add_todo(&timed).unwrap();

        let schedule = state.schedule_for(today);
        assert_eq!(schedule.all_day.len(), 1);
        let slot = NaiveTime::from_hms_opt(9, 30, 0).unwrap();
        assert_eq!(schedule.slots[&slot][0].title, "timed");
    }

    #[test_context(StateTestContext)]
    #[test]
    fn test_subtask_and_note_mutators(_ctx: &mut StateTestContext) {
        let mut state = state();
        let id = state.add_todo(&Task::new("parent")).unwrap().unwrap();

        let subtask_id = state.add_subtask(id, "step").unwrap().unwrap();
        let note_id = state.add_note(id, "remember").unwrap().unwrap();
        assert_eq!(state.todos[0].subtasks.len(), 1);
        assert_eq!(state.todos[0].notes.len(), 1);

        state.toggle_subtask(subtask_id, true).unwrap();
        assert!(state.todos[0].subtasks[0].done);

        state.update_note(note_id, "changed").unwrap();
        assert_eq!(state.todos[0].notes[0].content, "changed");

        state.remove_subtask(subtask_id).unwrap();
        state.remove_note(note_id).unwrap();
        assert!(state.todos[0].subtasks.is_empty());
        assert!(state.todos[0].notes.is_empty());
    }

    #[test_context(StateTestContext)]
    #[test]
    fn test_tracking_via_state(_ctx: &mut StateTestContext) {
        let mut state = state();
        let id = state.add_todo(&Task::new("tracked")).unwrap().unwrap();

        state.start_tracking(id).unwrap();
        assert!(state.todos[0].tracking.unwrap().is_running());

        let total = state.stop_tracking(id).unwrap();
        assert!(total.is_some());
        assert!(!state.todos[0].tracking.unwrap().is_running());

        // Stopping again fails inside the store and becomes a no-op
        assert!(state.stop_tracking(id).unwrap().is_none());
    }

    #[test_context(StateTestContext)]
    #[test]
    fn test_delete_category_clears_task_link(_ctx: &mut StateTestContext) {
        let mut state = state();

        state.add_category(&Category::new("Chores", "#808080")).unwrap();
        let category_id = state.categories[0].id.unwrap();

        let mut task = Task::new("vacuum");
        task.category_id = Some(category_id);
        state.add_todo(&task).unwrap();

        let cleared = state.delete_category(category_id).unwrap();
        assert_eq!(cleared, Some(1));
        assert!(state.categories.is_empty());
        assert_eq!(state.todos.len(), 1);
        assert!(state.todos[0].category_id.is_none());
    }

    #[test_context(StateTestContext)]
    #[test]
    fn test_template_mutators(_ctx: &mut StateTestContext) {
        let mut state = state();

        let seed = TaskSeed {
            title: "Standup".to_string(),
            ..Default::default()
        };
        state.add_template(&TaskTemplate::new("standup", None, seed)).unwrap();
        assert_eq!(state.templates.len(), 1);

        let mut template = state.templates[0].clone();
        template.seed.title = "Daily standup".to_string();
        template.description = Some("Every weekday".to_string());
        state.update_template(&template).unwrap();
        assert_eq!(state.templates[0].seed.title, "Daily standup");
        assert_eq!(state.templates[0].description.as_deref(), Some("Every weekday"));

        state.delete_template("standup").unwrap();
        assert!(state.templates.is_empty());
    }

    #[test_context(StateTestContext)]
    #[test]
    fn test_update_settings(_ctx: &mut StateTestContext) {
        let mut state = state();

        let mut settings = state.settings.clone();
        settings.theme = "dark".to_string();
        settings.week_start = 6;
        state.update_settings(&settings).unwrap();

        assert_eq!(state.settings.theme, "dark");
        assert_eq!(state.settings.week_start, 6);
    }

    #[test_context(StateTestContext)]
    #[test]
    fn test_recompute_stats_fills_window(_ctx: &mut StateTestContext) {
        let mut state = state();
        let today = Local::now().date_naive();

        let mut due_today = Task::new("due");
        due_today.due_date = today.and_hms_opt(8, 0, 0);
        let id = state.add_todo(&due_today).unwrap().unwrap();
        state.toggle_completion(id, true).unwrap();

        state.recompute_stats().unwrap();
        let today_row = state.stats_window.iter().find(|day| day.date == today).unwrap();
        assert_eq!(today_row.total, 1);
        assert_eq!(today_row.completed, 1);
    }
}
