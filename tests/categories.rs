#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use tudu::db::categories::{Categories, Category};
    use tudu::db::db::Db;
    use tudu::db::tasks::Tasks;
    use tudu::libs::task::Task;

    struct CategoryTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for CategoryTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            CategoryTestContext { _temp_dir: temp_dir }
        }
    }

    #[test_context(CategoryTestContext)]
    #[test]
    fn test_create_and_list(_ctx: &mut CategoryTestContext) {
        let db = Db::new().unwrap();
        let mut categories = Categories::new(&db);

        categories.create(&Category::new("Work", "#ff0000")).unwrap();
        categories.create(&Category::new("Home", "#00ff00")).unwrap();

        let all = categories.list().unwrap();
        assert_eq!(all.len(), 2);
        // Listing is name-ordered
        assert_eq!(all[0].name, "Home");
        assert_eq!(all[1].name, "Work");
    }

    #[test_context(CategoryTestContext)]
    #[test]
    fn test_create_requires_existing_parent(_ctx: &mut CategoryTestContext) {
        let db = Db::new().unwrap();
        let mut categories = Categories::new(&db);

        let mut orphan = Category::new("Orphan", "#808080");
        orphan.parent_id = Some(999);
        assert!(categories.create(&orphan).is_err());
    }

    #[test_context(CategoryTestContext)]
    #[test]
    fn test_children(_ctx: &mut CategoryTestContext) {
        let db = Db::new().unwrap();
        let mut categories = Categories::new(&db);

        let parent_id = categories.create(&Category::new("Projects", "#808080")).unwrap();
        let mut child = Category::new("Rust", "#808080");
        child.parent_id = Some(parent_id);
        categories.create(&child).unwrap();

        let children = categories.children(parent_id).unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].name, "Rust");
    }

    #[test_context(CategoryTestContext)]
    #[test]
    fn test_update_rejects_cycle(_ctx: &mut CategoryTestContext) {
        let db = Db::new().unwrap();
        let mut categories = Categories::new(&db);

        let a_id = categories.create(&Category::new("A", "#808080")).unwrap();
        let mut b = Category::new("B", "#808080");
        b.parent_id = Some(a_id);
        let b_id = categories.create(&b).unwrap();

        // Self-parent and ancestor-parent both form cycles
        let mut a = categories.get(a_id).unwrap().unwrap();
        a.parent_id = Some(a_id);
        assert!(categories.update(&a).is_err());
        a.parent_id = Some(b_id);
        assert!(categories.update(&a).is_err());
    }

    #[test_context(CategoryTestContext)]
    #[test]
    fn test_update_unsaved_category_fails(_ctx: &mut CategoryTestContext) {
        let db = Db::new().unwrap();
        let mut categories = Categories::new(&db);

        let err = categories.update(&Category::new("Unsaved", "#808080")).unwrap_err();
        assert!(err.to_string().contains("has not been saved"));
    }

    #[test_context(CategoryTestContext)]
    #[test]
    fn test_delete_clears_task_refs_but_keeps_tasks(_ctx: &mut CategoryTestContext) {
        let db = Db::new().unwrap();
        let mut categories = Categories::new(&db);
        let mut tasks = Tasks::new(&db);

        let category_id = categories.create(&Category::new("Doomed", "#808080")).unwrap();
        let mut task = Task::new("Survivor");
        task.category_id = Some(category_id);
        task.tags = vec!["keep".to_string()];
        let task_id = tasks.insert(&task).unwrap();

        let cleared = categories.delete(category_id).unwrap();
        assert_eq!(cleared, 1);
        assert!(categories.get(category_id).unwrap().is_none());

        let survivor = tasks.get(task_id).unwrap().unwrap();
        assert!(survivor.category_id.is_none());
        assert_eq!(survivor.title, "Survivor");
        assert_eq!(survivor.tags, vec!["keep"]);
    }

    #[test_context(CategoryTestContext)]
    #[test]
    fn test_delete_promotes_children_to_root(_ctx: &mut CategoryTestContext) {
        let db = Db::new().unwrap();
        let mut categories = Categories::new(&db);

        let parent_id = categories.create(&Category::new("Parent", "#808080")).unwrap();
        let mut child = Category::new("Child", "#808080");
        child.parent_id = Some(parent_id);
        let child_id = categories.create(&child).unwrap();

        categories.delete(parent_id).unwrap();

        let promoted = categories.get(child_id).unwrap().unwrap();
        assert!(promoted.parent_id.is_none());
    }

    #[test_context(CategoryTestContext)]
    #[test]
    fn test_delete_missing_category_fails(_ctx: &mut CategoryTestContext) {
        let db = Db::new().unwrap();
        let mut categories = Categories::new(&db);

        assert!(categories.delete(999).is_err());
    }
}
