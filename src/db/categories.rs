//! Category tree operations.
//!
//! Categories form a tree through an optional parent reference. Deleting a
//! category is a soft cascade: referencing tasks keep all their data and only
//! lose the category link, and child categories are promoted to the root.

use crate::db::db::Db;
use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

const INSERT_CATEGORY: &str = "INSERT INTO categories (name, color, parent_id) VALUES (?1, ?2, ?3)";
const UPDATE_CATEGORY: &str = "UPDATE categories SET name = ?2, color = ?3, parent_id = ?4 WHERE id = ?1";
const DELETE_CATEGORY: &str = "DELETE FROM categories WHERE id = ?1";
const SELECT_ALL_CATEGORIES: &str = "SELECT id, name, color, parent_id FROM categories ORDER BY name";
const SELECT_CATEGORY_BY_ID: &str = "SELECT id, name, color, parent_id FROM categories WHERE id = ?1";
const SELECT_CHILDREN: &str = "SELECT id, name, color, parent_id FROM categories WHERE parent_id = ?1 ORDER BY name";
const CLEAR_TASK_REFS: &str = "UPDATE tasks SET category_id = NULL WHERE category_id = ?1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Option<i64>,
    pub name: String,
    pub color: String,
    pub parent_id: Option<i64>,
}

impl Category {
    pub fn new(name: &str, color: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            color: color.to_string(),
            parent_id: None,
        }
    }
}

/// Repository for the category collection.
pub struct Categories<'a> {
    conn: &'a Connection,
}

impl<'a> Categories<'a> {
    pub fn new(db: &'a Db) -> Self {
        Self { conn: &db.conn }
    }

    pub fn create(&mut self, category: &Category) -> Result<i64> {
        if let Some(parent_id) = category.parent_id {
            self.ensure_exists(parent_id)?;
        }
        self.conn.execute(INSERT_CATEGORY, params![category.name, category.color, category.parent_id])?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn update(&mut self, category: &Category) -> Result<()> {
        let id = category.id.ok_or_else(|| msg_error_anyhow!(Message::CategoryNotPersisted))?;
        if self.would_form_cycle(id, category.parent_id)? {
            return Err(msg_error_anyhow!(Message::CategoryParentInvalid(id)));
        }
        let affected = self
            .conn
            .execute(UPDATE_CATEGORY, params![id, category.name, category.color, category.parent_id])?;
        if affected == 0 {
            return Err(msg_error_anyhow!(Message::CategoryNotFoundWithId(id)));
        }
        Ok(())
    }

    /// Deletes a category, clearing the reference on any tasks that point at
    /// it. Returns the number of tasks whose reference was cleared.
    pub fn delete(&mut self, id: i64) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        let cleared = tx.execute(CLEAR_TASK_REFS, params![id])?;
        let affected = tx.execute(DELETE_CATEGORY, params![id])?;
        if affected == 0 {
            // Transaction drops without commit, nothing was changed.
            return Err(msg_error_anyhow!(Message::CategoryNotFoundWithId(id)));
        }
        tx.commit()?;
        Ok(cleared)
    }

    pub fn list(&mut self) -> Result<Vec<Category>> {
        let mut stmt = self.conn.prepare(SELECT_ALL_CATEGORIES)?;
        let categories = stmt.query_map([], map_category_row)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(categories)
    }

    pub fn get(&mut self, id: i64) -> Result<Option<Category>> {
        self.conn
            .query_row(SELECT_CATEGORY_BY_ID, params![id], map_category_row)
            .optional()
            .map_err(Into::into)
    }

    /// Direct children of the given category.
    pub fn children(&mut self, parent_id: i64) -> Result<Vec<Category>> {
        let mut stmt = self.conn.prepare(SELECT_CHILDREN)?;
        let categories = stmt.query_map(params![parent_id], map_category_row)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(categories)
    }

    fn ensure_exists(&mut self, id: i64) -> Result<()> {
        if self.get(id)?.is_none() {
            return Err(msg_error_anyhow!(Message::CategoryNotFoundWithId(id)));
        }
        Ok(())
    }

    /// Walks up from `parent_id` to check that `id` is not among its
    /// ancestors, which would turn the tree into a cycle.
    fn would_form_cycle(&mut self, id: i64, parent_id: Option<i64>) -> Result<bool> {
        let mut cursor = parent_id;
        while let Some(current) = cursor {
            if current == id {
                return Ok(true);
            }
            cursor = match self.get(current)? {
                Some(category) => category.parent_id,
                None => None,
            };
        }
        Ok(false)
    }
}

fn map_category_row(row: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        color: row.get(2)?,
        parent_id: row.get(3)?,
    })
}
