//! Reusable task template system.
//!
//! A template pairs a unique name with an embedded partial task payload used
//! to seed new tasks. Applying a template copies the payload into a fresh
//! [`Task`]; deleting a template never affects tasks created from it.

use crate::db::db::Db;
use crate::libs::messages::Message;
use crate::libs::task::{Priority, RecurrenceRule, Task};
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

const INSERT_TEMPLATE: &str = "INSERT INTO templates (name, description, payload) VALUES (?1, ?2, ?3)";
const UPDATE_TEMPLATE: &str = "UPDATE templates SET description = ?2, payload = ?3 WHERE name = ?1";
const DELETE_TEMPLATE: &str = "DELETE FROM templates WHERE name = ?1";
const SELECT_ALL_TEMPLATES: &str = "SELECT id, name, description, payload, created_at FROM templates ORDER BY name";
const SELECT_TEMPLATE_BY_NAME: &str = "SELECT id, name, description, payload, created_at FROM templates WHERE name = ?1";
const TEMPLATE_EXISTS: &str = "SELECT COUNT(*) FROM templates WHERE name = ?1";

/// The partial task payload a template carries.
///
/// Only fields meaningful as defaults are included; scheduling fields with
/// absolute timestamps are deliberately left out since they would be stale by
/// the time the template is applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskSeed {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<RecurrenceRule>,
}

/// A named, reusable task blueprint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskTemplate {
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub seed: TaskSeed,
    pub created_at: Option<NaiveDateTime>,
}

impl TaskTemplate {
    pub fn new(name: &str, description: Option<String>, seed: TaskSeed) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            description,
            seed,
            created_at: None,
        }
    }

    /// Builds a new task from the template payload.
    pub fn instantiate(&self) -> Task {
        let mut task = Task::new(&self.seed.title);
        task.description = self.seed.description.clone();
        task.priority = self.seed.priority;
        task.tags = self.seed.tags.clone();
        task.category_id = self.seed.category_id;
        task.recurrence = self.seed.recurrence.clone();
        task
    }
}

/// Repository for the template collection.
pub struct Templates<'a> {
    conn: &'a Connection,
}

impl<'a> Templates<'a> {
    pub fn new(db: &'a Db) -> Self {
        Self { conn: &db.conn }
    }

    pub fn create(&mut self, template: &TaskTemplate) -> Result<i64> {
        if self.exists(&template.name)? {
            return Err(msg_error_anyhow!(Message::TemplateAlreadyExists(template.name.clone())));
        }
        self.conn.execute(
            INSERT_TEMPLATE,
            params![template.name, template.description, serde_json::to_string(&template.seed)?],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn update(&mut self, template: &TaskTemplate) -> Result<()> {
        let affected = self.conn.execute(
            UPDATE_TEMPLATE,
            params![template.name, template.description, serde_json::to_string(&template.seed)?],
        )?;
        if affected == 0 {
            return Err(msg_error_anyhow!(Message::TemplateNotFound(template.name.clone())));
        }
        Ok(())
    }

    pub fn delete(&mut self, name: &str) -> Result<()> {
        let affected = self.conn.execute(DELETE_TEMPLATE, params![name])?;
        if affected == 0 {
            return Err(msg_error_anyhow!(Message::TemplateNotFound(name.to_string())));
        }
        Ok(())
    }

    pub fn list(&mut self) -> Result<Vec<TaskTemplate>> {
        let mut stmt = self.conn.prepare(SELECT_ALL_TEMPLATES)?;
        let templates = stmt.query_map([], map_template_row)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(templates)
    }

    pub fn get(&mut self, name: &str) -> Result<Option<TaskTemplate>> {
        self.conn
            .query_row(SELECT_TEMPLATE_BY_NAME, params![name], map_template_row)
            .optional()
            .map_err(Into::into)
    }

    pub fn exists(&mut self, name: &str) -> Result<bool> {
        let count: i32 = self.conn.query_row(TEMPLATE_EXISTS, params![name], |row| row.get(0))?;
        Ok(count > 0)
    }
}

fn map_template_row(row: &Row<'_>) -> rusqlite::Result<TaskTemplate> {
    // A payload that fails to parse decays to an empty seed rather than
    // failing the whole listing.
    let seed: TaskSeed = row
        .get::<_, String>(3)
        .map(|raw| serde_json::from_str(&raw).unwrap_or_default())?;

    Ok(TaskTemplate {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        description: row.get(2)?,
        seed,
        created_at: row.get(4)?,
    })
}
