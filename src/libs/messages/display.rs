//! Display implementation for tudu application messages.
//!
//! Converts structured `Message` variants into the human-readable text shown
//! in the terminal. All user-facing wording lives here, in one place, so the
//! rest of the codebase deals only with typed messages.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === TASK MESSAGES ===
            Message::TaskCreated(id) => format!("Task #{} created successfully", id),
            Message::TaskUpdated(id) => format!("Task #{} updated successfully", id),
            Message::TaskDeleted(id) => format!("Task #{} deleted", id),
            Message::TaskNotFoundWithId(id) => format!("Task with ID {} not found.", id),
            Message::TaskNotPersisted => "Task has not been saved yet and cannot be updated.".to_string(),
            Message::TasksDeletedCount(count) => format!("Deleted {} task(s).", count),
            Message::NoTasksFound => "No tasks found.".to_string(),
            Message::TasksHeader => "Tasks:".to_string(),
            Message::TaskCompleted(id) => format!("Task #{} marked as completed", id),
            Message::TaskReopened(id) => format!("Task #{} reopened", id),
            Message::ConfirmDeleteTask(title) => format!("Delete task '{}'?", title),
            Message::ConfirmDeleteAllTasks(count) => format!("Delete ALL {} tasks? This cannot be undone.", count),
            Message::DayViewHeader(date) => format!("📅 Schedule for {}", date),
            Message::NoTasksForDay(date) => format!("No tasks scheduled for {}.", date),

            // === SUBTASK MESSAGES ===
            Message::SubtaskAdded(id) => format!("Subtask #{} added", id),
            Message::SubtaskNotFound(id) => format!("Subtask with ID {} not found.", id),
            Message::SubtaskToggled(id) => format!("Subtask #{} toggled", id),
            Message::SubtaskRemoved(id) => format!("Subtask #{} removed", id),

            // === NOTE MESSAGES ===
            Message::NoteAdded(id) => format!("Note #{} added", id),
            Message::NoteNotFound(id) => format!("Note with ID {} not found.", id),
            Message::NoteUpdated(id) => format!("Note #{} updated", id),
            Message::NoteRemoved(id) => format!("Note #{} removed", id),

            // === TIME TRACKING MESSAGES ===
            Message::TrackingStarted(id) => format!("Started time tracking for task #{}", id),
            Message::TrackingStopped(id, total) => format!("Stopped time tracking for task #{} (total {})", id, total),
            Message::TrackingAlreadyRunning(id) => format!("Time tracking is already running for task #{}.", id),
            Message::TrackingNotRunning(id) => format!("Time tracking is not running for task #{}.", id),

            // === CATEGORY MESSAGES ===
            Message::CategoryCreated(name) => format!("Category '{}' created", name),
            Message::CategoryUpdated(name) => format!("Category '{}' updated", name),
            Message::CategoryDeleted(name, cleared) => format!("Category '{}' deleted, {} task reference(s) cleared", name, cleared),
            Message::CategoryNotFoundWithId(id) => format!("Category with ID {} not found.", id),
            Message::CategoryNotPersisted => "Category has not been saved yet and cannot be updated.".to_string(),
            Message::NoCategoriesFound => "No categories found.".to_string(),
            Message::CategoriesHeader => "Categories:".to_string(),
            Message::ConfirmDeleteCategory(name) => format!("Delete category '{}'? Tasks keep their data, only the category link is cleared.", name),
            Message::CategoryParentInvalid(id) => format!("Category {} cannot be its own ancestor.", id),

            // === TEMPLATE MESSAGES ===
            Message::TemplateCreated(name) => format!("Template '{}' created", name),
            Message::TemplateUpdated(name) => format!("Template '{}' updated", name),
            Message::TemplateDeleted(name) => format!("Template '{}' deleted", name),
            Message::TemplateNotFound(name) => format!("Template '{}' not found.", name),
            Message::TemplateAlreadyExists(name) => format!("Template '{}' already exists.", name),
            Message::NoTemplatesFound => "No templates found.".to_string(),
            Message::TemplatesHeader => "Templates:".to_string(),
            Message::TemplateApplied(name, id) => format!("Created task #{} from template '{}'", id, name),
            Message::ConfirmDeleteTemplate(name) => format!("Delete template '{}'?", name),
            Message::SelectTemplate => "Select a template".to_string(),

            // === SETTINGS MESSAGES ===
            Message::SettingsHeader => "Settings:".to_string(),
            Message::SettingsSaved => "Settings saved".to_string(),
            Message::UnknownSettingKey(key) => format!("Unknown setting '{}'.", key),
            Message::InvalidSettingValue(key, value) => format!("Invalid value '{}' for setting '{}'.", value, key),

            // === STATISTICS MESSAGES ===
            Message::StatsRecomputed(date) => format!("Statistics recomputed for {}", date),
            Message::StatsHeader(date) => format!("📊 Statistics for {}", date),
            Message::StatsWindowHeader(days) => format!("📊 Statistics for the last {} days", days),
            Message::NoStatsForDate(date) => format!("No statistics recorded for {}.", date),

            // === DATABASE MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All migrations completed successfully".to_string(),
            Message::DatabaseVersion(version) => format!("Database schema version: {}", version),
            Message::DatabaseUpToDate => "Database is up to date".to_string(),
            Message::MigrationHistory => "Migration history:".to_string(),
            Message::ConfirmResetDatabase => "Reset the database? ALL data will be lost.".to_string(),
            Message::DatabaseResetCompleted => "Database reset completed".to_string(),
            Message::DatabaseResetFailed => "Database reset failed".to_string(),

            // === VALIDATION MESSAGES ===
            Message::InvalidDate(input) => format!("Invalid date '{}'. Expected YYYY-MM-DD or YYYY-MM-DD HH:MM.", input),
            Message::InvalidPriority(input) => format!("Invalid priority '{}'. Expected low, medium or high.", input),
            Message::InvalidWeekStart(input) => format!("Invalid week start '{}'. Expected 0 (Monday) through 6 (Sunday).", input),
            Message::InvalidRecurrence(input) => format!("Invalid recurrence '{}'. Expected none, daily, weekly, monthly, yearly or custom.", input),
            Message::InvalidStatusFilter(input) => format!("Invalid status '{}'. Expected all, active or completed.", input),

            // === PROMPTS ===
            Message::PromptTaskTitle => "Task title".to_string(),
            Message::PromptTaskDescription => "Description".to_string(),
            Message::PromptTaskDueDate => "Due date (YYYY-MM-DD [HH:MM], empty for none)".to_string(),
            Message::PromptTaskPriority => "Priority (low/medium/high)".to_string(),
            Message::PromptSubtaskText => "Subtask text".to_string(),
            Message::PromptNoteContent => "Note content".to_string(),
            Message::PromptCategoryName => "Category name".to_string(),
            Message::PromptCategoryColor => "Category color".to_string(),
            Message::PromptTemplateName => "Template name".to_string(),
            Message::PromptTemplateDescription => "Template description".to_string(),

            // === GENERAL MESSAGES ===
            Message::SelectTaskAction => "What would you like to do?".to_string(),
            Message::SelectCategoryAction => "What would you like to do?".to_string(),
            Message::SelectTemplateAction => "What would you like to do?".to_string(),
            Message::OperationCancelled => "Operation cancelled".to_string(),
        };

        write!(f, "{}", text)
    }
}
