//! Daily statistics records.
//!
//! One row per calendar day, keyed by the ISO date. Rows are derived data:
//! they are created or overwritten by the statistics builder and never edited
//! by the user, so writes are plain upserts.

use crate::db::db::Db;
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const UPSERT_STATS: &str = "INSERT INTO daily_stats (date, completed, total, by_category, by_tag) VALUES (?1, ?2, ?3, ?4, ?5)
     ON CONFLICT(date) DO UPDATE SET completed = ?2, total = ?3, by_category = ?4, by_tag = ?5";
const SELECT_STATS_BY_DATE: &str = "SELECT date, completed, total, by_category, by_tag FROM daily_stats WHERE date = ?1";
const SELECT_STATS_RANGE: &str = "SELECT date, completed, total, by_category, by_tag FROM daily_stats WHERE date >= ?1 AND date <= ?2 ORDER BY date";

/// A completed/total counter pair used by the per-category and per-tag
/// rollups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub completed: u32,
    pub total: u32,
}

/// Derived completion rollup for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayStats {
    pub date: NaiveDate,
    /// Tasks whose completion timestamp falls on this day.
    pub completed: u32,
    /// Tasks due on this day.
    pub total: u32,
    /// Per-category tallies over tasks due this day, keyed by category ID.
    pub by_category: BTreeMap<String, Tally>,
    /// Per-tag tallies over tasks due this day.
    pub by_tag: BTreeMap<String, Tally>,
}

impl DayStats {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            completed: 0,
            total: 0,
            by_category: BTreeMap::new(),
            by_tag: BTreeMap::new(),
        }
    }
}

/// Repository for daily statistics rows.
pub struct Stats<'a> {
    conn: &'a Connection,
}

impl<'a> Stats<'a> {
    pub fn new(db: &'a Db) -> Self {
        Self { conn: &db.conn }
    }

    /// Creates or overwrites the row for the record's day.
    pub fn upsert(&mut self, stats: &DayStats) -> Result<()> {
        self.conn.execute(
            UPSERT_STATS,
            params![
                stats.date,
                stats.completed,
                stats.total,
                serde_json::to_string(&stats.by_category)?,
                serde_json::to_string(&stats.by_tag)?,
            ],
        )?;
        Ok(())
    }

    pub fn get(&mut self, date: NaiveDate) -> Result<Option<DayStats>> {
        self.conn
            .query_row(SELECT_STATS_BY_DATE, params![date], map_stats_row)
            .optional()
            .map_err(Into::into)
    }

    /// Rows in the inclusive date range, ordered by date.
    pub fn range(&mut self, from: NaiveDate, to: NaiveDate) -> Result<Vec<DayStats>> {
        let mut stmt = self.conn.prepare(SELECT_STATS_RANGE)?;
        let stats = stmt.query_map(params![from, to], map_stats_row)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(stats)
    }
}

fn map_stats_row(row: &Row<'_>) -> rusqlite::Result<DayStats> {
    let by_category: BTreeMap<String, Tally> = row
        .get::<_, String>(3)
        .map(|raw| serde_json::from_str(&raw).unwrap_or_default())?;
    let by_tag: BTreeMap<String, Tally> = row
        .get::<_, String>(4)
        .map(|raw| serde_json::from_str(&raw).unwrap_or_default())?;

    Ok(DayStats {
        date: row.get(0)?,
        completed: row.get(1)?,
        total: row.get(2)?,
        by_category,
        by_tag,
    })
}
