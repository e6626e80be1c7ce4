#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use tudu::db::db::Db;
    use tudu::db::migrations::{get_db_version, needs_migration, MigrationManager};

    struct MigrationTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for MigrationTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            MigrationTestContext { _temp_dir: temp_dir }
        }
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migrations_run_automatically(_ctx: &mut MigrationTestContext) {
        // Opening the DB applies all pending migrations
        let db = Db::new().unwrap();

        let version = get_db_version(&db.conn).unwrap();
        assert_eq!(version, MigrationManager::new().latest_version());
        assert!(!needs_migration(&db.conn).unwrap());
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migration_history_is_ordered(_ctx: &mut MigrationTestContext) {
        let mut conn = Connection::open_in_memory().unwrap();
        let manager = MigrationManager::new();

        manager.run_migrations(&mut conn).unwrap();

        let history = manager.get_migration_history(&conn).unwrap();
        assert!(!history.is_empty());
        for (i, entry) in history.iter().enumerate() {
            assert_eq!(entry.0 as usize, i + 1);
            assert!(!entry.1.is_empty());
        }
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migration_idempotency(_ctx: &mut MigrationTestContext) {
        let mut conn = Connection::open_in_memory().unwrap();
        let manager = MigrationManager::new();

        manager.run_migrations(&mut conn).unwrap();
        let version1 = get_db_version(&conn).unwrap();

        manager.run_migrations(&mut conn).unwrap();
        let version2 = get_db_version(&conn).unwrap();

        assert_eq!(version1, version2);
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_is_migration_applied(_ctx: &mut MigrationTestContext) {
        let mut conn = Connection::open_in_memory().unwrap();
        let manager = MigrationManager::new();
        manager.run_migrations(&mut conn).unwrap();

        assert!(manager.is_migration_applied(&conn, 1).unwrap());
        assert!(manager.is_migration_applied(&conn, manager.latest_version()).unwrap());
        assert!(!manager.is_migration_applied(&conn, manager.latest_version() + 1).unwrap());
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_schema_tables_exist(_ctx: &mut MigrationTestContext) {
        let db = Db::new().unwrap();

        for table in ["tasks", "subtasks", "notes", "categories", "settings", "templates", "daily_stats"] {
            let count: i32 = db
                .conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                    [table],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(count, 1, "missing table {}", table);
        }
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_settings_singleton_is_seeded(_ctx: &mut MigrationTestContext) {
        let db = Db::new().unwrap();

        let count: i32 = db.conn.query_row("SELECT COUNT(*) FROM settings", [], |row| row.get(0)).unwrap();
        assert_eq!(count, 1);

        let theme: String = db.conn.query_row("SELECT theme FROM settings WHERE id = 1", [], |row| row.get(0)).unwrap();
        assert_eq!(theme, "light");
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_reset_recreates_empty_database(_ctx: &mut MigrationTestContext) {
        let db = Db::new().unwrap();
        db.conn.execute("INSERT INTO tasks (title) VALUES ('Doomed')", []).unwrap();

        assert!(db.reset());

        let db = Db::new().unwrap();
        let task_count: i32 = db.conn.query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0)).unwrap();
        assert_eq!(task_count, 0);

        // Settings are reseeded with the schema
        let settings_count: i32 = db.conn.query_row("SELECT COUNT(*) FROM settings", [], |row| row.get(0)).unwrap();
        assert_eq!(settings_count, 1);
    }
}
