use anyhow::{Context, Result};
use rusqlite::OptionalExtension;

use mastermind_types::Company;

use crate::db::columns::uuid_at;
use crate::db::DbPool;

pub struct CompanyRepository {
    pool: DbPool,
}

impl CompanyRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get the company the planner works for.
    ///
    /// Deployments hold a single company row; if there are several the
    /// oldest-inserted one wins.
    pub fn first(&self) -> Result<Option<Company>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, posts_per_week
             FROM companies
             ORDER BY rowid
             LIMIT 1",
        )?;

        let company = stmt
            .query_row([], |row| {
                Ok(Company {
                    id: uuid_at(row, 0)?,
                    name: row.get(1)?,
                    posts_per_week: row.get(2)?,
                })
            })
            .optional()
            .context("Failed to load company")?;

        Ok(company)
    }
}
