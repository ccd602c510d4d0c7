use anyhow::{Context, Result};
use uuid::Uuid;

use mastermind_types::Keyword;

use crate::db::columns::uuid_at;
use crate::db::DbPool;

pub struct KeywordRepository {
    pool: DbPool,
}

impl KeywordRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get all keywords of a company
    pub fn list_by_company(&self, company_id: &Uuid) -> Result<Vec<Keyword>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, company_id, keyword
             FROM keywords
             WHERE company_id = ?
             ORDER BY keyword",
        )?;

        let keywords = stmt
            .query_map([company_id.to_string()], |row| {
                Ok(Keyword {
                    id: uuid_at(row, 0)?,
                    company_id: uuid_at(row, 1)?,
                    keyword: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to load keywords")?;

        Ok(keywords)
    }
}
