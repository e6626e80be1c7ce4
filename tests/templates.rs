#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use tudu::db::db::Db;
    use tudu::db::tasks::Tasks;
    use tudu::db::templates::{TaskSeed, TaskTemplate, Templates};
    use tudu::libs::task::Priority;

    struct TemplateTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for TemplateTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            TemplateTestContext { _temp_dir: temp_dir }
        }
    }

    fn weekly_review() -> TaskTemplate {
        let seed = TaskSeed {
            title: "Weekly review".to_string(),
            description: "Go through the inbox".to_string(),
            priority: Priority::High,
            tags: vec!["review".to_string(), "planning".to_string()],
            category_id: None,
            recurrence: None,
        };
        TaskTemplate::new("weekly-review", Some("End of week ritual".to_string()), seed)
    }

    #[test_context(TemplateTestContext)]
    #[test]
    fn test_create_get_round_trip(_ctx: &mut TemplateTestContext) {
        let db = Db::new().unwrap();
        let mut templates = Templates::new(&db);

        templates.create(&weekly_review()).unwrap();

        let stored = templates.get("weekly-review").unwrap().unwrap();
        assert_eq!(stored.description.as_deref(), Some("End of week ritual"));
        assert_eq!(stored.seed.title, "Weekly review");
        assert_eq!(stored.seed.priority, Priority::High);
        assert_eq!(stored.seed.tags, vec!["review", "planning"]);
        assert!(stored.created_at.is_some());
    }

    #[test_context(TemplateTestContext)]
    #[test]
    fn test_duplicate_name_rejected(_ctx: &mut TemplateTestContext) {
        let db = Db::new().unwrap();
        let mut templates = Templates::new(&db);

        templates.create(&weekly_review()).unwrap();
        assert!(templates.create(&weekly_review()).is_err());
        assert!(templates.exists("weekly-review").unwrap());
    }

    #[test_context(TemplateTestContext)]
    #[test]
    fn test_update_and_delete(_ctx: &mut TemplateTestContext) {
        let db = Db::new().unwrap();
        let mut templates = Templates::new(&db);

        templates.create(&weekly_review()).unwrap();

        let mut template = templates.get("weekly-review").unwrap().unwrap();
        template.seed.priority = Priority::Low;
        templates.update(&template).unwrap();
        assert_eq!(templates.get("weekly-review").unwrap().unwrap().seed.priority, Priority::Low);

        templates.delete("weekly-review").unwrap();
        assert!(templates.get("weekly-review").unwrap().is_none());
        assert!(templates.delete("weekly-review").is_err());
    }

    #[test_context(TemplateTestContext)]
    #[test]
    fn test_instantiate_copies_seed(_ctx: &mut TemplateTestContext) {
        let template = weekly_review();
        let task = template.instantiate();

        assert_eq!(task.title, "Weekly review");
        assert_eq!(task.description, "Go through the inbox");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.tags, vec!["review", "planning"]);
        assert!(task.id.is_none());
        assert!(!task.completed);
        assert!(task.due_date.is_none());
    }

    #[test_context(TemplateTestContext)]
    #[test]
    fn test_deleting_template_keeps_created_tasks(_ctx: &mut TemplateTestContext) {
        let db = Db::new().unwrap();
        let mut templates = Templates::new(&db);
        let mut tasks = Tasks::new(&db);

        templates.create(&weekly_review()).unwrap();
        let template = templates.get("weekly-review").unwrap().unwrap();
        let task_id = tasks.insert(&template.instantiate()).unwrap();

        templates.delete("weekly-review").unwrap();

        let survivor = tasks.get(task_id).unwrap().unwrap();
        assert_eq!(survivor.title, "Weekly review");
    }

    #[test_context(TemplateTestContext)]
    #[test]
    fn test_malformed_payload_decays_to_default_seed(_ctx: &mut TemplateTestContext) {
        let db = Db::new().unwrap();

        db.conn
            .execute("INSERT INTO templates (name, payload) VALUES ('broken', 'not-json')", [])
            .unwrap();

        let stored = Templates::new(&db).get("broken").unwrap().unwrap();
        assert_eq!(stored.seed, TaskSeed::default());
    }
}
