//! Core library modules for the tudu application.
//!
//! Serves as the main entry point for all tudu library components, providing
//! a centralized access point to the application's core functionality.
//!
//! ## Features
//!
//! - **Core Infrastructure**: Data storage paths, messaging
//! - **Domain Types**: Tasks with subtasks, notes, recurrence and tracking
//! - **Query Engine**: Pure multi-predicate filtering and calendar bucketing
//! - **Statistics**: Daily completion rollup builder
//! - **State Management**: Reloadable application state container
//! - **User Interface**: Console rendering and formatting
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tudu::libs::state::AppState;
//! use tudu::libs::task::Task;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut state = AppState::new()?;
//! state.add_todo(&Task::new("Water the plants"))?;
//! # Ok(())
//! # }
//! ```

pub mod data_storage;
pub mod filter;
pub mod formatter;
pub mod messages;
pub mod rollup;
pub mod state;
pub mod task;
pub mod view;
