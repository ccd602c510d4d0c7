use anyhow::{Context, Result};
use uuid::Uuid;

use mastermind_types::Subreddit;

use crate::db::columns::uuid_at;
use crate::db::DbPool;

pub struct SubredditRepository {
    pool: DbPool,
}

impl SubredditRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get all subreddits of a company
    pub fn list_by_company(&self, company_id: &Uuid) -> Result<Vec<Subreddit>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, company_id, name, max_posts_per_week, notes
             FROM subreddits
             WHERE company_id = ?
             ORDER BY name",
        )?;

        let subreddits = stmt
            .query_map([company_id.to_string()], |row| {
                // Negative caps mean no posts
                let cap: Option<i64> = row.get(3)?;
                Ok(Subreddit {
                    id: uuid_at(row, 0)?,
                    company_id: uuid_at(row, 1)?,
                    name: row.get(2)?,
                    max_posts_per_week: cap.map(|c| c.clamp(0, u32::MAX as i64) as u32),
                    notes: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to load subreddits")?;

        Ok(subreddits)
    }
}
