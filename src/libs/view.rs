//! Terminal table rendering for tasks, categories, templates and statistics.

use crate::db::categories::Category;
use crate::db::settings::UserSettings;
use crate::db::stats::DayStats;
use crate::db::templates::TaskTemplate;
use crate::libs::filter::DaySchedule;
use crate::libs::formatter::{format_secs, format_timestamp};
use crate::libs::task::Task;
use anyhow::Result;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn tasks(tasks: &[Task]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "TITLE", "DUE", "PRIORITY", "TAGS", "CATEGORY", "DONE"]);
        for task in tasks {
            table.add_row(row![
                task.id.unwrap_or(0),
                task.title,
                format_timestamp(&task.due_date),
                task.priority,
                task.tags.join(", "),
                task.category_id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
                if task.completed { "✓" } else { "" }
            ]);
        }
        table.printstd();

        Ok(())
    }

    /// Detailed single-task view including subtasks, notes and tracking.
    pub fn task_details(task: &Task) -> Result<()> {
        let mut table = Table::new();
        table.add_row(row!["ID", task.id.unwrap_or(0)]);
        table.add_row(row!["Title", task.title]);
        table.add_row(row!["Description", task.description]);
        table.add_row(row!["Completed", task.completed]);
        table.add_row(row!["Created", format_timestamp(&task.created_at)]);
        table.add_row(row!["Due", format_timestamp(&task.due_date)]);
        table.add_row(row!["Priority", task.priority]);
        table.add_row(row!["Tags", task.tags.join(", ")]);
        if let Some(tracking) = &task.tracking {
            let state = if tracking.is_running() { "running" } else { "stopped" };
            table.add_row(row!["Tracking", format!("{} ({})", format_secs(tracking.accumulated_secs), state)]);
        }
        table.printstd();

        if !task.subtasks.is_empty() {
            let mut subtable = Table::new();
            subtable.add_row(row!["SUBTASK", "TEXT", "DONE"]);
            for subtask in &task.subtasks {
                subtable.add_row(row![subtask.id.unwrap_or(0), subtask.text, if subtask.done { "✓" } else { "" }]);
            }
            subtable.printstd();
        }

        if !task.notes.is_empty() {
            let mut notetable = Table::new();
            notetable.add_row(row!["NOTE", "CONTENT", "UPDATED"]);
            for note in &task.notes {
                notetable.add_row(row![note.id.unwrap_or(0), note.content, format_timestamp(&note.updated_at)]);
            }
            notetable.printstd();
        }

        Ok(())
    }

    pub fn schedule(schedule: &DaySchedule) -> Result<()> {
        let mut table = Table::new();
        table.add_row(row!["SLOT", "ID", "TITLE", "DONE"]);
        for task in &schedule.all_day {
            table.add_row(row!["all-day", task.id.unwrap_or(0), task.title, if task.completed { "✓" } else { "" }]);
        }
        for (slot, tasks) in &schedule.slots {
            for task in tasks {
                table.add_row(row![
                    slot.format("%H:%M"),
                    task.id.unwrap_or(0),
                    task.title,
                    if task.completed { "✓" } else { "" }
                ]);
            }
        }
        table.printstd();

        Ok(())
    }

    pub fn categories(categories: &[Category]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "COLOR", "PARENT"]);
        for category in categories {
            table.add_row(row![
                category.id.unwrap_or(0),
                category.name,
                category.color,
                category.parent_id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string())
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn templates(templates: &[TaskTemplate]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "DESCRIPTION", "TASK TITLE", "PRIORITY"]);
        for template in templates {
            table.add_row(row![
                template.id.unwrap_or(0),
                template.name,
                template.description.clone().unwrap_or_default(),
                template.seed.title,
                template.seed.priority
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn stats(stats: &[DayStats]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["DATE", "COMPLETED", "DUE", "TOP TAGS"]);
        for day in stats {
            let mut tags: Vec<(&String, u32)> = day.by_tag.iter().map(|(tag, tally)| (tag, tally.total)).collect();
            tags.sort_by(|a, b| b.1.cmp(&a.1));
            let top_tags = tags.iter().take(3).map(|(tag, _)| tag.as_str()).collect::<Vec<_>>().join(", ");

            table.add_row(row![day.date, day.completed, day.total, top_tags]);
        }
        table.printstd();

        Ok(())
    }

    pub fn settings(settings: &UserSettings) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["KEY", "VALUE"]);
        table.add_row(row!["theme", settings.theme]);
        table.add_row(row!["locale", settings.locale]);
        table.add_row(row!["date_format", settings.date_format]);
        table.add_row(row!["default_view", settings.default_view]);
        table.add_row(row!["calendar_view", settings.calendar_view]);
        table.add_row(row!["week_start", settings.week_start]);
        table.printstd();

        Ok(())
    }
}
