//! User settings singleton.
//!
//! Exactly one settings row exists (fixed ID 1), seeded by migration v3 and
//! reseeded on a full database reset. Reads fall back to the built-in
//! defaults if the row is somehow missing, writes upsert it.

use crate::db::db::Db;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

const SETTINGS_ID: i64 = 1;

const SELECT_SETTINGS: &str = "SELECT theme, locale, date_format, default_view, calendar_view, week_start FROM settings WHERE id = ?1";
const UPSERT_SETTINGS: &str = "INSERT INTO settings (id, theme, locale, date_format, default_view, calendar_view, week_start)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
     ON CONFLICT(id) DO UPDATE SET theme = ?2, locale = ?3, date_format = ?4, default_view = ?5, calendar_view = ?6, week_start = ?7";

/// User preferences: display theme, locale, formats and calendar defaults.
///
/// `week_start` counts days from Monday (0 = Monday, 6 = Sunday).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    pub theme: String,
    pub locale: String,
    pub date_format: String,
    pub default_view: String,
    pub calendar_view: String,
    pub week_start: u8,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            theme: "light".to_string(),
            locale: "en-US".to_string(),
            date_format: "%Y-%m-%d".to_string(),
            default_view: "list".to_string(),
            calendar_view: "month".to_string(),
            week_start: 0,
        }
    }
}

/// Repository for the settings singleton.
pub struct Settings<'a> {
    conn: &'a Connection,
}

impl<'a> Settings<'a> {
    pub fn new(db: &'a Db) -> Self {
        Self { conn: &db.conn }
    }

    /// Returns the stored settings, or the defaults if the row is missing.
    pub fn get(&mut self) -> Result<UserSettings> {
        let settings = self
            .conn
            .query_row(SELECT_SETTINGS, params![SETTINGS_ID], |row| {
                Ok(UserSettings {
                    theme: row.get(0)?,
                    locale: row.get(1)?,
                    date_format: row.get(2)?,
                    default_view: row.get(3)?,
                    calendar_view: row.get(4)?,
                    week_start: row.get(5)?,
                })
            })
            .optional()?;

        Ok(settings.unwrap_or_default())
    }

    pub fn save(&mut self, settings: &UserSettings) -> Result<()> {
        self.conn.execute(
            UPSERT_SETTINGS,
            params![
                SETTINGS_ID,
                settings.theme,
                settings.locale,
                settings.date_format,
                settings.default_view,
                settings.calendar_view,
                settings.week_start,
            ],
        )?;
        Ok(())
    }
}
