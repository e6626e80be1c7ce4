//! # Tudu - Local-First Personal Task Manager
//!
//! A command-line utility for creating, organizing and reviewing tasks,
//! persisted entirely in an embedded SQLite store on the local machine.
//!
//! ## Features
//!
//! - **Task Management**: Due dates, priorities, tags, subtasks and notes
//! - **Organization**: Hierarchical categories and reusable task templates
//! - **Scheduling**: Descriptive recurrence rules and a day view with half-hour slots
//! - **Time Tracking**: Per-task start/stop tracking with accumulated totals
//! - **Statistics**: Daily completion rollups per category and tag
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tudu::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
