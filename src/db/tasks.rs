//! Core task collection operations.
//!
//! CRUD for tasks plus the mutations the rest of the application builds on:
//! completion toggling, subtask and note management and per-task time
//! tracking. Reads normalize records so that `tags`, `subtasks` and `notes`
//! are always present collections and `description` is never absent, even for
//! rows written before those fields existed.

use crate::db::db::Db;
use crate::libs::messages::Message;
use crate::libs::task::{Note, Priority, RecurrenceRule, Subtask, Task, TimeTracking};
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashMap;

const TASK_COLUMNS: &str = "id, title, description, completed, created_at, due_date, start_date, end_date, \
     tags, priority, recurrence, parent_id, category_id, completed_at, \
     track_started_at, track_stopped_at, track_accumulated";

const INSERT_TASK: &str = "INSERT INTO tasks (title, description, completed, created_at, due_date, start_date, end_date, \
     tags, priority, recurrence, parent_id, category_id, completed_at, \
     track_started_at, track_stopped_at, track_accumulated) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)";
const UPDATE_TASK: &str = "UPDATE tasks SET title = ?2, description = ?3, completed = ?4, due_date = ?5, start_date = ?6, \
     end_date = ?7, tags = ?8, priority = ?9, recurrence = ?10, parent_id = ?11, category_id = ?12, completed_at = ?13 \
     WHERE id = ?1";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";
const SET_COMPLETED: &str = "UPDATE tasks SET completed = ?2, completed_at = ?3 WHERE id = ?1";

const INSERT_SUBTASK: &str = "INSERT INTO subtasks (task_id, text, done) VALUES (?1, ?2, ?3)";
const UPDATE_SUBTASK_DONE: &str = "UPDATE subtasks SET done = ?2 WHERE id = ?1";
const DELETE_SUBTASK: &str = "DELETE FROM subtasks WHERE id = ?1";
const SELECT_SUBTASKS: &str = "SELECT id, task_id, text, done FROM subtasks ORDER BY id";
const SELECT_SUBTASKS_BY_TASK: &str = "SELECT id, text, done FROM subtasks WHERE task_id = ?1 ORDER BY id";

const INSERT_NOTE: &str = "INSERT INTO notes (task_id, content, created_at, updated_at) VALUES (?1, ?2, ?3, ?4)";
const UPDATE_NOTE: &str = "UPDATE notes SET content = ?2, updated_at = ?3 WHERE id = ?1";
const DELETE_NOTE: &str = "DELETE FROM notes WHERE id = ?1";
const SELECT_NOTES: &str = "SELECT id, task_id, content, created_at, updated_at FROM notes ORDER BY id";
const SELECT_NOTES_BY_TASK: &str = "SELECT id, content, created_at, updated_at FROM notes WHERE task_id = ?1 ORDER BY id";

const SELECT_TRACKING: &str = "SELECT track_started_at, track_stopped_at, track_accumulated FROM tasks WHERE id = ?1";
const UPDATE_TRACKING: &str = "UPDATE tasks SET track_started_at = ?2, track_stopped_at = ?3, track_accumulated = ?4 WHERE id = ?1";

/// Repository for the task collection.
pub struct Tasks<'a> {
    conn: &'a Connection,
}

impl<'a> Tasks<'a> {
    pub fn new(db: &'a Db) -> Self {
        Self { conn: &db.conn }
    }

    /// Inserts a task together with any attached subtasks and notes.
    ///
    /// Returns the store-assigned task ID.
    pub fn insert(&mut self, task: &Task) -> Result<i64> {
        let tx = self.conn.unchecked_transaction()?;
        let created_at = task.created_at.unwrap_or_else(now);
        let tracking = task.tracking.unwrap_or(TimeTracking {
            started_at: None,
            stopped_at: None,
            accumulated_secs: 0,
        });

        tx.execute(
            INSERT_TASK,
            params![
                task.title,
                task.description,
                task.completed,
                created_at,
                task.due_date,
                task.start_date,
                task.end_date,
                tags_to_json(&task.tags),
                task.priority.as_str(),
                recurrence_to_json(&task.recurrence)?,
                task.parent_id,
                task.category_id,
                task.completed_at,
                tracking.started_at,
                tracking.stopped_at,
                tracking.accumulated_secs,
            ],
        )?;
        let task_id = tx.last_insert_rowid();

        for subtask in &task.subtasks {
            tx.execute(INSERT_SUBTASK, params![task_id, subtask.text, subtask.done])?;
        }
        for note in &task.notes {
            let note_created = note.created_at.unwrap_or_else(now);
            let note_updated = note.updated_at.unwrap_or(note_created);
            tx.execute(INSERT_NOTE, params![task_id, note.content, note_created, note_updated])?;
        }

        tx.commit()?;
        Ok(task_id)
    }

    /// Fetches a single task by ID with its subtasks and notes attached.
    pub fn get(&mut self, id: i64) -> Result<Option<Task>> {
        let task = self
            .conn
            .query_row(&format!("SELECT {} FROM tasks WHERE id = ?1", TASK_COLUMNS), params![id], map_task_row)
            .optional()?;

        match task {
            Some(mut task) => {
                task.subtasks = self.subtasks_of(id)?;
                task.notes = self.notes_of(id)?;
                Ok(Some(task))
            }
            None => Ok(None),
        }
    }

    /// Fetches all tasks in insertion (key) order.
    pub fn get_all(&mut self) -> Result<Vec<Task>> {
        self.fetch_where("1 = 1", params![])
    }

    /// Fetches tasks whose due date falls on the given calendar day.
    pub fn get_by_due_day(&mut self, day: NaiveDate) -> Result<Vec<Task>> {
        self.fetch_where("due_date IS NOT NULL AND date(due_date) = date(?1)", params![day])
    }

    /// Fetches tasks belonging to the given category.
    pub fn get_by_category(&mut self, category_id: i64) -> Result<Vec<Task>> {
        self.fetch_where("category_id = ?1", params![category_id])
    }

    /// Fetches direct child tasks of the given parent task.
    pub fn get_by_parent(&mut self, parent_id: i64) -> Result<Vec<Task>> {
        self.fetch_where("parent_id = ?1", params![parent_id])
    }

    /// Fetches tasks with the given priority.
    pub fn get_by_priority(&mut self, priority: Priority) -> Result<Vec<Task>> {
        self.fetch_where("priority = ?1", params![priority.as_str()])
    }

    /// Updates a task's scalar fields. Subtasks and notes have their own
    /// mutation paths and are not touched here.
    pub fn update(&mut self, task: &Task) -> Result<()> {
        let id = task.id.ok_or_else(|| msg_error_anyhow!(Message::TaskNotPersisted))?;
        let affected = self.conn.execute(
            UPDATE_TASK,
            params![
                id,
                task.title,
                task.description,
                task.completed,
                task.due_date,
                task.start_date,
                task.end_date,
                tags_to_json(&task.tags),
                task.priority.as_str(),
                recurrence_to_json(&task.recurrence)?,
                task.parent_id,
                task.category_id,
                task.completed_at,
            ],
        )?;
        if affected == 0 {
            return Err(msg_error_anyhow!(Message::TaskNotFoundWithId(id)));
        }
        Ok(())
    }

    /// Deletes a task; owned subtasks and notes cascade with it.
    pub fn delete(&mut self, id: i64) -> Result<()> {
        let affected = self.conn.execute(DELETE_TASK, params![id])?;
        if affected == 0 {
            return Err(msg_error_anyhow!(Message::TaskNotFoundWithId(id)));
        }
        Ok(())
    }

    /// Deletes every task in one transaction. Returns the number of deleted
    /// tasks; on failure the transaction rolls back and nothing is deleted.
    pub fn delete_all(&mut self) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM subtasks", [])?;
        tx.execute("DELETE FROM notes", [])?;
        let deleted = tx.execute("DELETE FROM tasks", [])?;
        tx.commit()?;
        Ok(deleted)
    }

    /// Sets the completion flag, stamping or clearing `completed_at` with it.
    pub fn set_completed(&mut self, id: i64, completed: bool) -> Result<()> {
        let completed_at = if completed { Some(now()) } else { None };
        let affected = self.conn.execute(SET_COMPLETED, params![id, completed, completed_at])?;
        if affected == 0 {
            return Err(msg_error_anyhow!(Message::TaskNotFoundWithId(id)));
        }
        Ok(())
    }

    // === Subtasks ===

    pub fn add_subtask(&mut self, task_id: i64, text: &str) -> Result<i64> {
        self.ensure_exists(task_id)?;
        self.conn.execute(INSERT_SUBTASK, params![task_id, text, false])?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn set_subtask_done(&mut self, subtask_id: i64, done: bool) -> Result<()> {
        let affected = self.conn.execute(UPDATE_SUBTASK_DONE, params![subtask_id, done])?;
        if affected == 0 {
            return Err(msg_error_anyhow!(Message::SubtaskNotFound(subtask_id)));
        }
        Ok(())
    }

    pub fn delete_subtask(&mut self, subtask_id: i64) -> Result<()> {
        let affected = self.conn.execute(DELETE_SUBTASK, params![subtask_id])?;
        if affected == 0 {
            return Err(msg_error_anyhow!(Message::SubtaskNotFound(subtask_id)));
        }
        Ok(())
    }

    // === Notes ===

    pub fn add_note(&mut self, task_id: i64, content: &str) -> Result<i64> {
        self.ensure_exists(task_id)?;
        let stamp = now();
        self.conn.execute(INSERT_NOTE, params![task_id, content, stamp, stamp])?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn update_note(&mut self, note_id: i64, content: &str) -> Result<()> {
        let affected = self.conn.execute(UPDATE_NOTE, params![note_id, content, now()])?;
        if affected == 0 {
            return Err(msg_error_anyhow!(Message::NoteNotFound(note_id)));
        }
        Ok(())
    }

    pub fn delete_note(&mut self, note_id: i64) -> Result<()> {
        let affected = self.conn.execute(DELETE_NOTE, params![note_id])?;
        if affected == 0 {
            return Err(msg_error_anyhow!(Message::NoteNotFound(note_id)));
        }
        Ok(())
    }

    // === Time tracking ===

    /// Starts the clock for a task. Fails if it is already running.
    pub fn start_tracking(&mut self, task_id: i64) -> Result<()> {
        let tracking = self.tracking_of(task_id)?;
        if tracking.is_running() {
            return Err(msg_error_anyhow!(Message::TrackingAlreadyRunning(task_id)));
        }
        self.conn.execute(
            UPDATE_TRACKING,
            params![task_id, Some(now()), None::<NaiveDateTime>, tracking.accumulated_secs],
        )?;
        Ok(())
    }

    /// Stops the clock, folding the elapsed time into the accumulated total.
    ///
    /// Returns the new accumulated duration in seconds.
    pub fn stop_tracking(&mut self, task_id: i64) -> Result<i64> {
        let tracking = self.tracking_of(task_id)?;
        let started_at = tracking
            .started_at
            .ok_or_else(|| msg_error_anyhow!(Message::TrackingNotRunning(task_id)))?;

        let stopped_at = now();
        let elapsed = (stopped_at - started_at).num_seconds().max(0);
        let accumulated = tracking.accumulated_secs + elapsed;
        self.conn.execute(
            UPDATE_TRACKING,
            params![task_id, None::<NaiveDateTime>, Some(stopped_at), accumulated],
        )?;
        Ok(accumulated)
    }

    // === Internals ===

    fn fetch_where(&mut self, predicate: &str, params: impl rusqlite::Params) -> Result<Vec<Task>> {
        let sql = format!("SELECT {} FROM tasks WHERE {} ORDER BY id", TASK_COLUMNS, predicate);
        let mut stmt = self.conn.prepare(&sql)?;
        let mut tasks = stmt.query_map(params, map_task_row)?.collect::<rusqlite::Result<Vec<Task>>>()?;

        self.attach_children(&mut tasks)?;
        Ok(tasks)
    }

    /// Loads all subtasks and notes in two queries and distributes them onto
    /// the given tasks, avoiding one pair of queries per task.
    fn attach_children(&mut self, tasks: &mut [Task]) -> Result<()> {
        if tasks.is_empty() {
            return Ok(());
        }

        let mut subtasks: HashMap<i64, Vec<Subtask>> = HashMap::new();
        let mut stmt = self.conn.prepare(SELECT_SUBTASKS)?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(1)?,
                Subtask {
                    id: Some(row.get(0)?),
                    text: row.get(2)?,
                    done: row.get(3)?,
                },
            ))
        })?;
        for row in rows {
            let (task_id, subtask) = row?;
            subtasks.entry(task_id).or_default().push(subtask);
        }

        let mut notes: HashMap<i64, Vec<Note>> = HashMap::new();
        let mut stmt = self.conn.prepare(SELECT_NOTES)?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(1)?,
                Note {
                    id: Some(row.get(0)?),
                    content: row.get(2)?,
                    created_at: row.get(3)?,
                    updated_at: row.get(4)?,
                },
            ))
        })?;
        for row in rows {
            let (task_id, note) = row?;
            notes.entry(task_id).or_default().push(note);
        }

        for task in tasks.iter_mut() {
            if let Some(id) = task.id {
                task.subtasks = subtasks.remove(&id).unwrap_or_default();
                task.notes = notes.remove(&id).unwrap_or_default();
            }
        }
        Ok(())
    }

    fn subtasks_of(&mut self, task_id: i64) -> Result<Vec<Subtask>> {
        let mut stmt = self.conn.prepare(SELECT_SUBTASKS_BY_TASK)?;
        let subtasks = stmt
            .query_map(params![task_id], |row| {
                Ok(Subtask {
                    id: Some(row.get(0)?),
                    text: row.get(1)?,
                    done: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(subtasks)
    }

    fn notes_of(&mut self, task_id: i64) -> Result<Vec<Note>> {
        let mut stmt = self.conn.prepare(SELECT_NOTES_BY_TASK)?;
        let notes = stmt
            .query_map(params![task_id], |row| {
                Ok(Note {
                    id: Some(row.get(0)?),
                    content: row.get(1)?,
                    created_at: row.get(2)?,
                    updated_at: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(notes)
    }

    fn tracking_of(&mut self, task_id: i64) -> Result<TimeTracking> {
        self.conn
            .query_row(SELECT_TRACKING, params![task_id], |row| {
                Ok(TimeTracking {
                    started_at: row.get(0)?,
                    stopped_at: row.get(1)?,
                    accumulated_secs: row.get(2)?,
                })
            })
            .optional()?
            .ok_or_else(|| msg_error_anyhow!(Message::TaskNotFoundWithId(task_id)))
    }

    fn ensure_exists(&mut self, task_id: i64) -> Result<()> {
        let count: i32 = self
            .conn
            .query_row("SELECT COUNT(*) FROM tasks WHERE id = ?1", params![task_id], |row| row.get(0))?;
        if count == 0 {
            return Err(msg_error_anyhow!(Message::TaskNotFoundWithId(task_id)));
        }
        Ok(())
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn tags_to_json(tags: &[String]) -> String {
    serde_json::to_string(tags).unwrap_or_else(|_| "[]".to_string())
}

fn recurrence_to_json(recurrence: &Option<RecurrenceRule>) -> Result<Option<String>> {
    Ok(match recurrence {
        Some(rule) => Some(serde_json::to_string(rule)?),
        None => None,
    })
}

/// Maps a task row, normalizing missing optional fields to defaults.
///
/// Malformed or absent JSON columns decay to empty collections rather than
/// failing the read; this is the read-repair behavior for records written by
/// older schema versions.
fn map_task_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    let tags: Vec<String> = row
        .get::<_, Option<String>>(8)?
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default();
    let priority = row.get::<_, String>(9)?.parse().unwrap_or_default();
    let recurrence: Option<RecurrenceRule> = row.get::<_, Option<String>>(10)?.and_then(|raw| serde_json::from_str(&raw).ok());

    let started_at: Option<NaiveDateTime> = row.get(14)?;
    let stopped_at: Option<NaiveDateTime> = row.get(15)?;
    let accumulated_secs: i64 = row.get(16)?;
    let tracking = if started_at.is_none() && stopped_at.is_none() && accumulated_secs == 0 {
        None
    } else {
        Some(TimeTracking {
            started_at,
            stopped_at,
            accumulated_secs,
        })
    };

    Ok(Task {
        id: Some(row.get(0)?),
        title: row.get(1)?,
        description: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        completed: row.get(3)?,
        created_at: row.get(4)?,
        due_date: row.get(5)?,
        start_date: row.get(6)?,
        end_date: row.get(7)?,
        tags,
        priority,
        recurrence,
        subtasks: Vec::new(),
        notes: Vec::new(),
        parent_id: row.get(11)?,
        category_id: row.get(12)?,
        completed_at: row.get(13)?,
        tracking,
    })
}
