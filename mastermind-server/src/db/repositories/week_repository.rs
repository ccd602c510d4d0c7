use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{OptionalExtension, Row};
use uuid::Uuid;

use mastermind_types::Week;

use crate::db::columns::{date_at, format_date, format_timestamp, uuid_at};
use crate::db::DbPool;

const WEEK_COLUMNS: &str = "id, company_id, week_start, week_number";

fn week_from_row(row: &Row<'_>) -> rusqlite::Result<Week> {
    Ok(Week {
        id: uuid_at(row, 0)?,
        company_id: uuid_at(row, 1)?,
        week_start: date_at(row, 2)?,
        week_number: row.get(3)?,
    })
}

pub struct WeekRepository {
    pool: DbPool,
}

impl WeekRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a new week. Fails if the company already has this week_number.
    pub fn create(&self, week: &Week) -> Result<()> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT INTO weeks (id, company_id, week_start, week_number, created_at)
             VALUES (?, ?, ?, ?, ?)",
            (
                week.id.to_string(),
                week.company_id.to_string(),
                format_date(&week.week_start),
                week.week_number,
                format_timestamp(&Utc::now()),
            ),
        )
        .with_context(|| format!("Failed to create week {}", week.week_number))?;
        Ok(())
    }

    /// Get the week with the highest week_number for a company
    pub fn latest(&self, company_id: &Uuid) -> Result<Option<Week>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM weeks
             WHERE company_id = ?
             ORDER BY week_number DESC
             LIMIT 1",
            WEEK_COLUMNS
        ))?;

        let week = stmt
            .query_row([company_id.to_string()], week_from_row)
            .optional()
            .context("Failed to load latest week")?;

        Ok(week)
    }

    /// Get the most recently generated week across all companies
    pub fn latest_overall(&self) -> Result<Option<Week>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM weeks
             ORDER BY week_number DESC, created_at DESC
             LIMIT 1",
            WEEK_COLUMNS
        ))?;

        let week = stmt
            .query_row([], week_from_row)
            .optional()
            .context("Failed to load latest week")?;

        Ok(week)
    }

    /// Get a single week by ID
    pub fn get_by_id(&self, week_id: &Uuid) -> Result<Option<Week>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!("SELECT {} FROM weeks WHERE id = ?", WEEK_COLUMNS))?;

        let week = stmt
            .query_row([week_id.to_string()], week_from_row)
            .optional()
            .context("Failed to load week")?;

        Ok(week)
    }

    /// Get a week by its number
    pub fn get_by_number(&self, week_number: i32) -> Result<Option<Week>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM weeks WHERE week_number = ? ORDER BY created_at DESC LIMIT 1",
            WEEK_COLUMNS
        ))?;

        let week = stmt
            .query_row([week_number], week_from_row)
            .optional()
            .context("Failed to load week")?;

        Ok(week)
    }

    /// Get all weeks, newest first
    pub fn list(&self) -> Result<Vec<Week>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM weeks ORDER BY week_number DESC",
            WEEK_COLUMNS
        ))?;

        let weeks = stmt
            .query_map([], week_from_row)?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to load weeks")?;

        Ok(weeks)
    }
}
