use crate::{
    libs::{
        filter::{CompletionFilter, TaskCriteria},
        formatter::{format_secs, parse_timestamp},
        messages::Message,
        state::AppState,
        task::{Priority, RecurrenceKind, RecurrenceRule, Task},
        view::View,
    },
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

#[derive(Debug, Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    command: Option<TaskCommand>,
}

#[derive(Debug, Args)]
struct CreateArgs {
    /// Task title
    title: Option<String>,
    /// Task description
    #[arg(short, long)]
    description: Option<String>,
    /// Due date: YYYY-MM-DD (all-day) or "YYYY-MM-DD HH:MM"
    #[arg(long)]
    due: Option<String>,
    /// Priority: low, medium or high
    #[arg(short, long)]
    priority: Option<String>,
    /// Tag to attach (repeatable)
    #[arg(short, long = "tag")]
    tags: Vec<String>,
    /// Category ID
    #[arg(long)]
    category: Option<i64>,
    /// Parent task ID
    #[arg(long)]
    parent: Option<i64>,
    /// Template name to seed the task from
    #[arg(long)]
    template: Option<String>,
    /// Recurrence kind: daily, weekly, monthly, yearly or custom
    #[arg(long)]
    recur: Option<String>,
    /// Recurrence interval (defaults to 1)
    #[arg(long)]
    every: Option<u32>,
    /// Recurrence end date: YYYY-MM-DD
    #[arg(long)]
    until: Option<String>,
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Only tasks due on this calendar day: YYYY-MM-DD
    #[arg(long)]
    date: Option<String>,
    /// Only tasks carrying this tag (repeatable, all must match)
    #[arg(short, long = "tag")]
    tags: Vec<String>,
    /// Only tasks in one of these category IDs (repeatable)
    #[arg(long = "category")]
    categories: Vec<i64>,
    /// Only tasks with this priority
    #[arg(short, long)]
    priority: Option<String>,
    /// Substring search over title, description, tags and notes
    #[arg(short, long)]
    search: Option<String>,
    /// Completion state: all, active or completed
    #[arg(long)]
    status: Option<String>,
}

#[derive(Debug, Args)]
struct EditArgs {
    /// Task ID
    id: i64,
    /// New title
    #[arg(long)]
    title: Option<String>,
    /// New description
    #[arg(short, long)]
    description: Option<String>,
    /// New due date, or "none" to clear
    #[arg(long)]
    due: Option<String>,
    /// New priority
    #[arg(short, long)]
    priority: Option<String>,
    /// Replacement tag set (repeatable)
    #[arg(short, long = "tag")]
    tags: Vec<String>,
    /// New category ID
    #[arg(long)]
    category: Option<i64>,
    /// Clear the category link
    #[arg(long)]
    no_category: bool,
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    /// Create a new task
    Create(CreateArgs),
    /// List tasks, optionally filtered
    List(ListArgs),
    /// Show one task with subtasks and notes
    Show {
        /// Task ID
        id: i64,
    },
    /// Calendar view of one day
    Day {
        /// Day to show: YYYY-MM-DD (defaults to today)
        date: Option<String>,
    },
    /// Edit a task's fields
    Edit(EditArgs),
    /// Mark a task completed
    Done {
        /// Task ID
        id: i64,
    },
    /// Reopen a completed task
    Undone {
        /// Task ID
        id: i64,
    },
    /// Delete a task with its subtasks and notes
    Delete {
        /// Task ID
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Delete every task
    DeleteAll {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Manage subtasks
    #[command(subcommand)]
    Subtask(SubtaskCommand),
    /// Manage notes
    #[command(subcommand)]
    Note(NoteCommand),
    /// Per-task time tracking
    #[command(subcommand)]
    Track(TrackCommand),
}

#[derive(Debug, Subcommand)]
enum SubtaskCommand {
    /// Add a subtask to a task
    Add {
        /// Parent task ID
        task_id: i64,
        /// Subtask text
        text: Option<String>,
    },
    /// Mark a subtask done
    Done {
        /// Subtask ID
        id: i64,
    },
    /// Reopen a subtask
    Undone {
        /// Subtask ID
        id: i64,
    },
    /// Remove a subtask
    Remove {
        /// Subtask ID
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
enum NoteCommand {
    /// Attach a note to a task
    Add {
        /// Parent task ID
        task_id: i64,
        /// Note content
        content: Option<String>,
    },
    /// Replace a note's content
    Edit {
        /// Note ID
        id: i64,
        /// New content
        content: String,
    },
    /// Remove a note
    Remove {
        /// Note ID
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
enum TrackCommand {
    /// Start the clock for a task
    Start {
        /// Task ID
        id: i64,
    },
    /// Stop the clock and fold the elapsed time into the total
    Stop {
        /// Task ID
        id: i64,
    },
}

pub fn cmd(args: TaskArgs) -> Result<()> {
    let mut state = AppState::new()?;

    match args.command {
        Some(TaskCommand::Create(create)) => handle_create(&mut state, create),
        Some(TaskCommand::List(list)) => handle_list(&mut state, list),
        Some(TaskCommand::Show { id }) => handle_show(&state, id),
        Some(TaskCommand::Day { date }) => handle_day(&state, date),
        Some(TaskCommand::Edit(edit)) => handle_edit(&mut state, edit),
        Some(TaskCommand::Done { id }) => handle_set_completed(&mut state, id, true),
        Some(TaskCommand::Undone { id }) => handle_set_completed(&mut state, id, false),
        Some(TaskCommand::Delete { id, yes }) => handle_delete(&mut state, id, yes),
        Some(TaskCommand::DeleteAll { yes }) => handle_delete_all(&mut state, yes),
        Some(TaskCommand::Subtask(subtask)) => handle_subtask(&mut state, subtask),
        Some(TaskCommand::Note(note)) => handle_note(&mut state, note),
        Some(TaskCommand::Track(track)) => handle_track(&mut state, track),
        None => handle_interactive(&mut state),
    }
}

fn handle_create(state: &mut AppState, args: CreateArgs) -> Result<()> {
    // A template seeds the task; explicit flags override its fields.
    let mut task = match &args.template {
        Some(name) => match state.templates.iter().find(|t| t.name == *name) {
            Some(template) => template.instantiate(),
            None => {
                msg_error!(Message::TemplateNotFound(name.clone()));
                return Ok(());
            }
        },
        None => {
            let title = match args.title.clone() {
                Some(title) => title,
                None => Input::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::PromptTaskTitle.to_string())
                    .interact_text()?,
            };
            Task::new(&title)
        }
    };

    if let Some(title) = args.title {
        task.title = title;
    }
    if let Some(description) = args.description {
        task.description = description;
    }
    if let Some(raw) = args.due {
        match parse_timestamp(&raw) {
            Some(due) => task.due_date = Some(due),
            None => {
                msg_error!(Message::InvalidDate(raw));
                return Ok(());
            }
        }
    }
    if let Some(raw) = args.priority {
        match raw.parse::<Priority>() {
            Ok(priority) => task.priority = priority,
            Err(_) => {
                msg_error!(Message::InvalidPriority(raw));
                return Ok(());
            }
        }
    }
    if !args.tags.is_empty() {
        task.tags = args.tags;
    }
    if args.category.is_some() {
        task.category_id = args.category;
    }
    task.parent_id = args.parent.or(task.parent_id);

    if let Some(raw) = args.recur {
        match raw.parse::<RecurrenceKind>() {
            Ok(RecurrenceKind::None) => task.recurrence = None,
            Ok(kind) => {
                let mut rule = RecurrenceRule::new(kind);
                rule.interval = args.every.unwrap_or(1).max(1);
                if let Some(raw_until) = args.until {
                    match NaiveDate::parse_from_str(&raw_until, "%Y-%m-%d") {
                        Ok(until) => rule.until = Some(until),
                        Err(_) => {
                            msg_error!(Message::InvalidDate(raw_until));
                            return Ok(());
                        }
                    }
                }
                task.recurrence = Some(rule);
            }
            Err(_) => {
                msg_error!(Message::InvalidRecurrence(raw));
                return Ok(());
            }
        }
    }

    if let Some(id) = state.add_todo(&task)? {
        msg_success!(Message::TaskCreated(id));
    }
    Ok(())
}

fn handle_list(state: &mut AppState, args: ListArgs) -> Result<()> {
    let mut criteria = TaskCriteria::default();

    if let Some(raw) = args.date {
        match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
            Ok(date) => criteria.date = Some(date),
            Err(_) => {
                msg_error!(Message::InvalidDate(raw));
                return Ok(());
            }
        }
    }
    criteria.tags = args.tags;
    criteria.categories = args.categories;
    if let Some(raw) = args.priority {
        match raw.parse::<Priority>() {
            Ok(priority) => criteria.priority = Some(priority),
            Err(_) => {
                msg_error!(Message::InvalidPriority(raw));
                return Ok(());
            }
        }
    }
    criteria.search = args.search.unwrap_or_default();
    if let Some(raw) = args.status {
        match raw.parse::<CompletionFilter>() {
            Ok(completion) => criteria.completion = completion,
            Err(other) => {
                msg_error!(Message::InvalidStatusFilter(other));
                return Ok(());
            }
        }
    }

    state.criteria = criteria;
    let tasks = state.filtered_todos();
    if tasks.is_empty() {
        msg_info!(Message::NoTasksFound);
        return Ok(());
    }

    msg_print!(Message::TasksHeader, true);
    View::tasks(&tasks)?;
    Ok(())
}

fn handle_show(state: &AppState, id: i64) -> Result<()> {
    match state.todos.iter().find(|task| task.id == Some(id)) {
        Some(task) => View::task_details(task),
        None => {
            msg_error!(Message::TaskNotFoundWithId(id));
            Ok(())
        }
    }
}

fn handle_day(state: &AppState, date: Option<String>) -> Result<()> {
    let date = match date {
        Some(raw) => match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
            Ok(date) => date,
            Err(_) => {
                msg_error!(Message::InvalidDate(raw));
                return Ok(());
            }
        },
        None => Local::now().date_naive(),
    };

    let schedule = state.schedule_for(date);
    if schedule.all_day.is_empty() && schedule.slots.is_empty() {
        msg_info!(Message::NoTasksForDay(date.to_string()));
        return Ok(());
    }

    msg_print!(Message::DayViewHeader(date.to_string()), true);
    View::schedule(&schedule)?;
    Ok(())
}

fn handle_edit(state: &mut AppState, args: EditArgs) -> Result<()> {
    let mut task = match state.todos.iter().find(|task| task.id == Some(args.id)) {
        Some(task) => task.clone(),
        None => {
            msg_error!(Message::TaskNotFoundWithId(args.id));
            return Ok(());
        }
    };

    if let Some(title) = args.title {
        task.title = title;
    }
    if let Some(description) = args.description {
        task.description = description;
    }
    if let Some(raw) = args.due {
        if raw.eq_ignore_ascii_case("none") {
            task.due_date = None;
        } else {
            match parse_timestamp(&raw) {
                Some(due) => task.due_date = Some(due),
                None => {
                    msg_error!(Message::InvalidDate(raw));
                    return Ok(());
                }
            }
        }
    }
    if let Some(raw) = args.priority {
        match raw.parse::<Priority>() {
            Ok(priority) => task.priority = priority,
            Err(_) => {
                msg_error!(Message::InvalidPriority(raw));
                return Ok(());
            }
        }
    }
    if !args.tags.is_empty() {
        task.tags = args.tags;
    }
    if args.no_category {
        task.category_id = None;
    } else if args.category.is_some() {
        task.category_id = args.category;
    }

    state.update_todo(&task)?;
    msg_success!(Message::TaskUpdated(args.id));
    Ok(())
}

fn handle_set_completed(state: &mut AppState, id: i64, completed: bool) -> Result<()> {
    if !state.todos.iter().any(|task| task.id == Some(id)) {
        msg_error!(Message::TaskNotFoundWithId(id));
        return Ok(());
    }

    state.toggle_completion(id, completed)?;
    if completed {
        msg_success!(Message::TaskCompleted(id));
    } else {
        msg_success!(Message::TaskReopened(id));
    }
    Ok(())
}

fn handle_delete(state: &mut AppState, id: i64, yes: bool) -> Result<()> {
    let title = match state.todos.iter().find(|task| task.id == Some(id)) {
        Some(task) => task.title.clone(),
        None => {
            msg_error!(Message::TaskNotFoundWithId(id));
            return Ok(());
        }
    };

    if !yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteTask(title).to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }
    }

    state.delete_todo(id)?;
    msg_success!(Message::TaskDeleted(id));
    Ok(())
}

fn handle_delete_all(state: &mut AppState, yes: bool) -> Result<()> {
    let count = state.todos.len();
    if count == 0 {
        msg_info!(Message::NoTasksFound);
        return Ok(());
    }

    if !yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteAllTasks(count).to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }
    }

    state.delete_all_todos()?;
    msg_success!(Message::TasksDeletedCount(count));
    Ok(())
}

fn handle_subtask(state: &mut AppState, command: SubtaskCommand) -> Result<()> {
    match command {
        SubtaskCommand::Add { task_id, text } => {
            if !state.todos.iter().any(|task| task.id == Some(task_id)) {
                msg_error!(Message::TaskNotFoundWithId(task_id));
                return Ok(());
            }
            let text = match text {
                Some(text) => text,
                None => Input::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::PromptSubtaskText.to_string())
                    .interact_text()?,
            };
            if let Some(id) = state.add_subtask(task_id, &text)? {
                msg_success!(Message::SubtaskAdded(id));
            }
        }
        SubtaskCommand::Done { id } => toggle_subtask(state, id, true)?,
        SubtaskCommand::Undone { id } => toggle_subtask(state, id, false)?,
        SubtaskCommand::Remove { id } => {
            if !subtask_exists(state, id) {
                msg_error!(Message::SubtaskNotFound(id));
                return Ok(());
            }
            state.remove_subtask(id)?;
            msg_success!(Message::SubtaskRemoved(id));
        }
    }
    Ok(())
}

fn handle_note(state: &mut AppState, command: NoteCommand) -> Result<()> {
    match command {
        NoteCommand::Add { task_id, content } => {
            if !state.todos.iter().any(|task| task.id == Some(task_id)) {
                msg_error!(Message::TaskNotFoundWithId(task_id));
                return Ok(());
            }
            let content = match content {
                Some(content) => content,
                None => Input::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::PromptNoteContent.to_string())
                    .interact_text()?,
            };
            if let Some(id) = state.add_note(task_id, &content)? {
                msg_success!(Message::NoteAdded(id));
            }
        }
        NoteCommand::Edit { id, content } => {
            if !note_exists(state, id) {
                msg_error!(Message::NoteNotFound(id));
                return Ok(());
            }
            state.update_note(id, &content)?;
            msg_success!(Message::NoteUpdated(id));
        }
        NoteCommand::Remove { id } => {
            if !note_exists(state, id) {
                msg_error!(Message::NoteNotFound(id));
                return Ok(());
            }
            state.remove_note(id)?;
            msg_success!(Message::NoteRemoved(id));
        }
    }
    Ok(())
}

fn handle_track(state: &mut AppState, command: TrackCommand) -> Result<()> {
    match command {
        TrackCommand::Start { id } => {
            let task = match state.todos.iter().find(|task| task.id == Some(id)) {
                Some(task) => task,
                None => {
                    msg_error!(Message::TaskNotFoundWithId(id));
                    return Ok(());
                }
            };
            if task.tracking.is_some_and(|tracking| tracking.is_running()) {
                msg_error!(Message::TrackingAlreadyRunning(id));
                return Ok(());
            }
            state.start_tracking(id)?;
            msg_success!(Message::TrackingStarted(id));
        }
        TrackCommand::Stop { id } => {
            if !state.todos.iter().any(|task| task.id == Some(id)) {
                msg_error!(Message::TaskNotFoundWithId(id));
                return Ok(());
            }
            if let Some(total) = state.stop_tracking(id)? {
                msg_success!(Message::TrackingStopped(id, format_secs(total)));
            }
        }
    }
    Ok(())
}

fn toggle_subtask(state: &mut AppState, id: i64, done: bool) -> Result<()> {
    if !subtask_exists(state, id) {
        msg_error!(Message::SubtaskNotFound(id));
        return Ok(());
    }
    state.toggle_subtask(id, done)?;
    msg_success!(Message::SubtaskToggled(id));
    Ok(())
}

fn subtask_exists(state: &AppState, id: i64) -> bool {
    state.todos.iter().flat_map(|task| &task.subtasks).any(|subtask| subtask.id == Some(id))
}

fn note_exists(state: &AppState, id: i64) -> bool {
    state.todos.iter().flat_map(|task| &task.notes).any(|note| note.id == Some(id))
}

fn handle_interactive(state: &mut AppState) -> Result<()> {
    let options = vec!["Create task", "List tasks", "Today's schedule"];
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::SelectTaskAction.to_string())
        .items(&options)
        .interact()?;

    match selection {
        0 => {
            let title: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptTaskTitle.to_string())
                .interact_text()?;
            let description: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptTaskDescription.to_string())
                .allow_empty(true)
                .interact_text()?;
            let due_raw: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptTaskDueDate.to_string())
                .allow_empty(true)
                .interact_text()?;
            let priority_raw: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptTaskPriority.to_string())
                .default("medium".to_string())
                .interact_text()?;

            let mut task = Task::new(&title);
            task.description = description;
            if !due_raw.is_empty() {
                match parse_timestamp(&due_raw) {
                    Some(due) => task.due_date = Some(due),
                    None => {
                        msg_error!(Message::InvalidDate(due_raw));
                        return Ok(());
                    }
                }
            }
            match priority_raw.parse::<Priority>() {
                Ok(priority) => task.priority = priority,
                Err(_) => {
                    msg_error!(Message::InvalidPriority(priority_raw));
                    return Ok(());
                }
            }

            if let Some(id) = state.add_todo(&task)? {
                msg_success!(Message::TaskCreated(id));
            }
            Ok(())
        }
        1 => handle_list(
            state,
            ListArgs {
                date: None,
                tags: Vec::new(),
                categories: Vec::new(),
                priority: None,
                search: None,
                status: None,
            },
        ),
        2 => handle_day(state, None),
        _ => Ok(()),
    }
}
