#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use tudu::db::db::Db;
    use tudu::db::settings::{Settings, UserSettings};

    struct SettingsTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for SettingsTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            SettingsTestContext { _temp_dir: temp_dir }
        }
    }

    #[test_context(SettingsTestContext)]
    #[test]
    fn test_fresh_database_returns_defaults(_ctx: &mut SettingsTestContext) {
        let db = Db::new().unwrap();
        let settings = Settings::new(&db).get().unwrap();
        assert_eq!(settings, UserSettings::default());
        assert_eq!(settings.theme, "light");
        assert_eq!(settings.week_start, 0);
    }

    #[test_context(SettingsTestContext)]
    #[test]
    fn test_save_and_reload(_ctx: &mut SettingsTestContext) {
        let db = Db::new().unwrap();
        let mut repo = Settings::new(&db);

        let mut settings = repo.get().unwrap();
        settings.theme = "dark".to_string();
        settings.locale = "de-DE".to_string();
        settings.calendar_view = "week".to_string();
        settings.week_start = 6;
        repo.save(&settings).unwrap();

        let stored = Settings::new(&db).get().unwrap();
        assert_eq!(stored, settings);
    }

    #[test_context(SettingsTestContext)]
    #[test]
    fn test_save_keeps_single_row(_ctx: &mut SettingsTestContext) {
        let db = Db::new().unwrap();
        let mut repo = Settings::new(&db);

        for theme in ["dark", "light", "dark"] {
            let mut settings = repo.get().unwrap();
            settings.theme = theme.to_string();
            repo.save(&settings).unwrap();
        }

        let count: i32 = db.conn.query_row("SELECT COUNT(*) FROM settings", [], |row| row.get(0)).unwrap();
        assert_eq!(count, 1);
    }

    #[test_context(SettingsTestContext)]
    #[test]
    fn test_missing_row_falls_back_to_defaults(_ctx: &mut SettingsTestContext) {
        let db = Db::new().unwrap();
        db.conn.execute("DELETE FROM settings", []).unwrap();

        let settings = Settings::new(&db).get().unwrap();
        assert_eq!(settings, UserSettings::default());
    }
}
