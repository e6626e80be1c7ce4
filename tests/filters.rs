#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use tudu::libs::filter::{day_schedule, filter_tasks, slot_start, CompletionFilter, TaskCriteria};
    use tudu::libs::task::{Note, Priority, Task};

    fn task(title: &str) -> Task {
        Task::new(title)
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_criteria_matches_everything() {
        let tasks = vec![task("a"), task("b")];
        let criteria = TaskCriteria::default();
        assert!(criteria.is_empty());
        assert_eq!(filter_tasks(&tasks, &criteria).len(), 2);
    }

    #[test]
    fn test_filter_preserves_order_and_is_idempotent() {
        let mut a = task("alpha");
        a.tags = vec!["work".to_string()];
        let mut b = task("beta");
        b.tags = vec!["work".to_string()];
        let mut c = task("gamma");
        c.tags = vec!["home".to_string()];

        let criteria = TaskCriteria {
            tags: vec!["work".to_string()],
            ..Default::default()
        };

        let once = filter_tasks(&[a, b, c], &criteria);
        let titles: Vec<&str> = once.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["alpha", "beta"]);

        let twice = filter_tasks(&once, &criteria);
        assert_eq!(twice.len(), once.len());
    }

    #[test]
    fn test_tag_filter_is_superset_match() {
        let mut multi = task("multi");
        multi.tags = vec!["work".to_string(), "urgent".to_string(), "q3".to_string()];
        let mut partial = task("partial");
        partial.tags = vec!["work".to_string()];

        let criteria = TaskCriteria {
            tags: vec!["work".to_string(), "urgent".to_string()],
            ..Default::default()
        };

        let found = filter_tasks(&[multi, partial], &criteria);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "multi");
    }

    #[test]
    fn test_date_filter_excludes_undated_tasks() {
        let mut dated = task("dated");
        dated.due_date = day(2026, 8, 25).and_hms_opt(10, 0, 0);
        let undated = task("undated");

        let criteria = TaskCriteria {
            date: Some(day(2026, 8, 25)),
            ..Default::default()
        };

        let found = filter_tasks(&[dated, undated], &criteria);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "dated");
    }

    #[test]
    fn test_category_filter_is_membership() {
        let mut in_first = task("in-first");
        in_first.category_id = Some(1);
        let mut in_third = task("in-third");
        in_third.category_id = Some(3);
        let uncategorized = task("none");

        let criteria = TaskCriteria {
            categories: vec![1, 2],
            ..Default::default()
        };

        let found = filter_tasks(&[in_first, in_third, uncategorized], &criteria);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "in-first");
    }

    #[test]
    fn test_priority_filter_is_exact() {
        let mut high = task("high");
        high.priority = Priority::High;
        let medium = task("medium");

        let criteria = TaskCriteria {
            priority: Some(Priority::High),
            ..Default::default()
        };

        let found = filter_tasks(&[high, medium], &criteria);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "high");
    }

    #[test]
    fn test_search_covers_notes_and_is_case_insensitive() {
        let mut with_note = task("plain");
        with_note.notes = vec![Note::new("Remember the BUDGET numbers")];
        let other = task("other");

        let criteria = TaskCriteria {
            search: "budget".to_string(),
            ..Default::default()
        };

        let found = filter_tasks(&[with_note, other], &criteria);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "plain");
    }

    #[test]
    fn test_completion_tri_state() {
        let mut done = task("done");
        done.completed = true;
        let open = task("open");
        let tasks = vec![done, open];

        let active = TaskCriteria {
            completion: CompletionFilter::Active,
            ..Default::default()
        };
        let completed = TaskCriteria {
            completion: CompletionFilter::Completed,
            ..Default::default()
        };

        assert_eq!(filter_tasks(&tasks, &active)[0].title, "open");
        assert_eq!(filter_tasks(&tasks, &completed)[0].title, "done");
        assert_eq!(filter_tasks(&tasks, &TaskCriteria::default()).len(), 2);
    }

    #[test]
    fn test_criteria_combine_with_and() {
        let mut matching = task("match");
        matching.tags = vec!["work".to_string()];
        matching.priority = Priority::High;
        let mut tag_only = task("tag-only");
        tag_only.tags = vec!["work".to_string()];

        let criteria = TaskCriteria {
            tags: vec!["work".to_string()],
            priority: Some(Priority::High),
            ..Default::default()
        };

        let found = filter_tasks(&[matching, tag_only], &criteria);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "match");
    }

    #[test]
    fn test_day_schedule_midnight_is_all_day() {
        let date = day(2026, 8, 25);
        let mut all_day = task("all-day");
        all_day.due_date = date.and_hms_opt(0, 0, 0);
        let mut timed = task("timed");
        timed.due_date = date.and_hms_opt(9, 15, 0);
        let mut other_day = task("elsewhere");
        other_day.due_date = day(2026, 8, 26).and_hms_opt(9, 0, 0);

        let schedule = day_schedule(&[all_day, timed, other_day], date);

        assert_eq!(schedule.all_day.len(), 1);
        assert_eq!(schedule.all_day[0].title, "all-day");

        let slot = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        assert_eq!(schedule.slots.len(), 1);
        assert_eq!(schedule.slots[&slot][0].title, "timed");
    }

    #[test]
    fn test_slot_start_truncates_to_half_hour() {
        let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
        assert_eq!(slot_start(t(9, 0)), t(9, 0));
        assert_eq!(slot_start(t(9, 29)), t(9, 0));
        assert_eq!(slot_start(t(9, 30)), t(9, 30));
        assert_eq!(slot_start(t(23, 59)), t(23, 30));
    }

    #[test]
    fn test_slot_groups_multiple_tasks() {
        let date = day(2026, 8, 25);
        let mut first = task("first");
        first.due_date = date.and_hms_opt(14, 5, 0);
        let mut second = task("second");
        second.due_date = date.and_hms_opt(14, 25, 0);

        let schedule = day_schedule(&[first, second], date);
        let slot = NaiveTime::from_hms_opt(14, 0, 0).unwrap();
        assert_eq!(schedule.slots[&slot].len(), 2);
    }
}
