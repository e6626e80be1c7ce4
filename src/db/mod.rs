//! Database layer for the tudu application.
//!
//! A complete persistence layer built on SQLite: a versioned migration system
//! for schema evolution and one repository module per record collection. All
//! repositories borrow the single open connection held by [`db::Db`].
//!
//! ## Collections
//!
//! - **tasks** (with owned subtask and note rows): the core record type
//! - **categories**: hierarchical organization with soft-cascade deletion
//! - **settings**: singleton user preferences row
//! - **templates**: reusable task blueprints
//! - **daily_stats**: derived per-day completion rollups
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tudu::db::{db::Db, tasks::Tasks};
//! use tudu::libs::task::Task;
//!
//! # fn main() -> anyhow::Result<()> {
//! let db = Db::new()?;
//! let mut tasks = Tasks::new(&db);
//! let id = tasks.insert(&Task::new("Buy milk"))?;
//! # Ok(())
//! # }
//! ```

/// Core database connection and initialization.
pub mod db;

/// Database schema migration system.
pub mod migrations;

/// Task collection: CRUD, completion, subtasks, notes and time tracking.
pub mod tasks;

/// Category tree with soft-cascade deletion.
pub mod categories;

/// User settings singleton.
pub mod settings;

/// Reusable task templates.
pub mod templates;

/// Daily statistics rows written by the rollup builder.
pub mod stats;
