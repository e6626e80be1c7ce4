//! Database connection handle.
//!
//! Opens the SQLite database in the platform data directory and applies any
//! pending schema migrations before handing the connection out. A migration
//! failure is fatal for the open attempt and propagates to the caller.

use crate::db::migrations::init_with_migrations;
use crate::libs::data_storage::DataStorage;
use anyhow::Result;
use rusqlite::Connection;
use std::fs;
use thiserror::Error;

pub const DB_FILE_NAME: &str = "tudu.db";

/// Failures while opening or preparing the store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not resolve the data directory: {0}")]
    DataDir(#[from] std::io::Error),
    #[error("could not open the database: {0}")]
    Open(#[from] rusqlite::Error),
}

/// The open, migrated database handle shared by all repositories.
pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens (creating if necessary) the database and runs pending migrations.
    pub fn new() -> Result<Db> {
        let db_file_path = DataStorage::new().get_path(DB_FILE_NAME).map_err(StoreError::DataDir)?;
        let mut conn = Connection::open(db_file_path).map_err(StoreError::Open)?;
        conn.pragma_update(None, "foreign_keys", true).map_err(StoreError::Open)?;
        init_with_migrations(&mut conn)?;

        Ok(Db { conn })
    }

    /// Opens an in-memory database with the full schema applied.
    ///
    /// Used by tests that do not need a file on disk.
    pub fn new_in_memory() -> Result<Db> {
        let mut conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", true)?;
        init_with_migrations(&mut conn)?;

        Ok(Db { conn })
    }

    /// Destroys the database file and recreates it at the current schema
    /// version, reseeding default settings.
    ///
    /// All internal errors collapse to `false`; there is no partial-state
    /// recovery beyond "the file is gone and a fresh one exists".
    pub fn reset(self) -> bool {
        drop(self.conn);

        let path = match DataStorage::new().get_path(DB_FILE_NAME) {
            Ok(path) => path,
            Err(_) => return false,
        };
        if path.exists() && fs::remove_file(&path).is_err() {
            return false;
        }

        Db::new().is_ok()
    }
}
