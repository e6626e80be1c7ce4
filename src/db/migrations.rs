//! Database schema migration management and versioning system.
//!
//! A monotonically increasing schema version gates one-time migration steps
//! executed when the database is opened. Applied versions are recorded in a
//! `migrations` tracking table, all pending steps run inside one transaction,
//! and DDL is idempotent-guarded (`IF NOT EXISTS`) so a step can be safely
//! re-run against a database that already carries its objects.
//!
//! ## Schema history
//!
//! - **v1**: task collection (tasks, subtasks, notes tables) plus
//!   `created_at`/`due_date` indexes.
//! - **v2**: time tracking columns on tasks. This is an eager backfill with
//!   SQL defaults rather than lazy defaulting at read time, so persisted rows
//!   are complete from this version on.
//! - **v3**: categories, settings, templates and daily statistics tables,
//!   default settings seed, and the secondary task indexes.

use crate::libs::messages::Message;
use crate::{msg_debug, msg_error};
use anyhow::Result;
use rusqlite::{params, Connection, Transaction};

/// SQL schema for the migrations tracking table.
const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

/// A single schema change with its version and transformation logic.
#[derive(Debug, Clone)]
struct Migration {
    version: u32,
    name: &'static str,
    up: fn(&Transaction) -> Result<()>,
}

/// Registry of all migrations, applied in version order.
pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    /// Registers all database migrations in chronological order.
    fn register_migrations(&mut self) {
        // Version 1: task collection and temporal indexes
        self.add_migration(1, "create_tasks_with_indexes", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS tasks (
                    id INTEGER PRIMARY KEY,
                    title TEXT NOT NULL,
                    description TEXT,
                    completed BOOLEAN NOT NULL DEFAULT 0,
                    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                    due_date TIMESTAMP,
                    start_date TIMESTAMP,
                    end_date TIMESTAMP,
                    tags TEXT,
                    priority TEXT NOT NULL DEFAULT 'medium',
                    recurrence TEXT,
                    parent_id INTEGER REFERENCES tasks(id) ON DELETE SET NULL,
                    category_id INTEGER,
                    completed_at TIMESTAMP
                )",
                [],
            )?;

            // Subtasks and notes are owned rows of the task collection
            tx.execute(
                "CREATE TABLE IF NOT EXISTS subtasks (
                    id INTEGER PRIMARY KEY,
                    task_id INTEGER NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
                    text TEXT NOT NULL,
                    done BOOLEAN NOT NULL DEFAULT 0
                )",
                [],
            )?;
            tx.execute(
                "CREATE TABLE IF NOT EXISTS notes (
                    id INTEGER PRIMARY KEY,
                    task_id INTEGER NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
                    content TEXT NOT NULL,
                    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                    updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
                )",
                [],
            )?;

            tx.execute("CREATE INDEX IF NOT EXISTS idx_tasks_created_at ON tasks(created_at)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_tasks_due_date ON tasks(due_date)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_subtasks_task_id ON subtasks(task_id)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_notes_task_id ON notes(task_id)", [])?;

            Ok(())
        });

        // Version 2: time tracking columns, backfilled with defaults
        self.add_migration(2, "add_time_tracking", |tx| {
            tx.execute("ALTER TABLE tasks ADD COLUMN track_started_at TIMESTAMP", [])?;
            tx.execute("ALTER TABLE tasks ADD COLUMN track_stopped_at TIMESTAMP", [])?;
            tx.execute("ALTER TABLE tasks ADD COLUMN track_accumulated INTEGER NOT NULL DEFAULT 0", [])?;
            Ok(())
        });

        // Version 3: remaining collections, settings seed, secondary indexes
        self.add_migration(3, "add_collections_and_indexes", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS categories (
                    id INTEGER PRIMARY KEY,
                    name TEXT NOT NULL,
                    color TEXT NOT NULL DEFAULT '#808080',
                    parent_id INTEGER REFERENCES categories(id) ON DELETE SET NULL
                )",
                [],
            )?;
            tx.execute(
                "CREATE TABLE IF NOT EXISTS settings (
                    id INTEGER PRIMARY KEY CHECK (id = 1),
                    theme TEXT NOT NULL,
                    locale TEXT NOT NULL,
                    date_format TEXT NOT NULL,
                    default_view TEXT NOT NULL,
                    calendar_view TEXT NOT NULL,
                    week_start INTEGER NOT NULL
                )",
                [],
            )?;
            tx.execute(
                "CREATE TABLE IF NOT EXISTS templates (
                    id INTEGER PRIMARY KEY,
                    name TEXT NOT NULL UNIQUE,
                    description TEXT,
                    payload TEXT NOT NULL,
                    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
                )",
                [],
            )?;
            tx.execute(
                "CREATE TABLE IF NOT EXISTS daily_stats (
                    date DATE PRIMARY KEY,
                    completed INTEGER NOT NULL DEFAULT 0,
                    total INTEGER NOT NULL DEFAULT 0,
                    by_category TEXT NOT NULL DEFAULT '{}',
                    by_tag TEXT NOT NULL DEFAULT '{}'
                )",
                [],
            )?;

            // Seed the settings singleton
            tx.execute(
                "INSERT OR IGNORE INTO settings (id, theme, locale, date_format, default_view, calendar_view, week_start)
                 VALUES (1, 'light', 'en-US', '%Y-%m-%d', 'list', 'month', 0)",
                [],
            )?;

            tx.execute("CREATE INDEX IF NOT EXISTS idx_tasks_start_date ON tasks(start_date)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_tasks_end_date ON tasks(end_date)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_tasks_priority ON tasks(priority)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_tasks_category_id ON tasks(category_id)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_tasks_parent_id ON tasks(parent_id)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_tasks_completed_at ON tasks(completed_at)", [])?;

            Ok(())
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    /// Executes all pending migrations in version order.
    ///
    /// Pending steps run inside one transaction; a failing step rolls back
    /// everything from this run and the error propagates to the caller.
    pub fn run_migrations(&self, conn: &mut Connection) -> Result<()> {
        conn.execute(MIGRATIONS_TABLE, [])?;

        let current_version = self.get_current_version(conn)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            msg_debug!("Database is up to date");
            return Ok(());
        }

        msg_debug!(Message::MigrationsFound(pending.len()));

        let tx = conn.transaction()?;

        for migration in pending {
            msg_debug!(Message::RunningMigration(migration.version, migration.name.to_string()));

            match (migration.up)(&tx) {
                Ok(()) => {
                    tx.execute(
                        "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                        params![migration.version, migration.name],
                    )?;
                    msg_debug!(Message::MigrationCompleted(migration.version));
                }
                Err(e) => {
                    msg_error!(Message::MigrationFailed(migration.version, e.to_string()));
                    return Err(e);
                }
            }
        }

        tx.commit()?;
        msg_debug!(Message::AllMigrationsCompleted);

        Ok(())
    }

    /// Returns the highest applied migration version, or 0 for a fresh store.
    fn get_current_version(&self, conn: &Connection) -> Result<u32> {
        let version: Option<u32> = conn.query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0)).unwrap_or(Some(0));

        Ok(version.unwrap_or(0))
    }

    /// Checks if a specific migration version has been applied.
    pub fn is_migration_applied(&self, conn: &Connection, version: u32) -> Result<bool> {
        let count: i32 = conn.query_row("SELECT COUNT(*) FROM migrations WHERE version = ?1", params![version], |row| row.get(0))?;

        Ok(count > 0)
    }

    /// Returns (version, name, applied_at) for each applied migration.
    pub fn get_migration_history(&self, conn: &Connection) -> Result<Vec<(u32, String, String)>> {
        let mut stmt = conn.prepare("SELECT version, name, applied_at FROM migrations ORDER BY version")?;

        let history = stmt
            .query_map([], |row| Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(history)
    }

    /// Latest migration version known to this build.
    pub fn latest_version(&self) -> u32 {
        self.migrations.last().map(|m| m.version).unwrap_or(0)
    }
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies all pending migrations to the given connection.
pub fn init_with_migrations(conn: &mut Connection) -> Result<()> {
    let manager = MigrationManager::new();
    manager.run_migrations(conn)?;
    Ok(())
}

/// Returns the current database schema version.
pub fn get_db_version(conn: &Connection) -> Result<u32> {
    let manager = MigrationManager::new();
    manager.get_current_version(conn)
}

/// Checks if the database requires migration to the latest schema version.
pub fn needs_migration(conn: &Connection) -> Result<bool> {
    let manager = MigrationManager::new();
    let current = manager.get_current_version(conn)?;
    Ok(current < manager.latest_version())
}
