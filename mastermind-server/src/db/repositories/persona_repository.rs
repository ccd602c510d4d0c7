use anyhow::{Context, Result};
use uuid::Uuid;

use mastermind_types::Persona;

use crate::db::columns::uuid_at;
use crate::db::DbPool;

pub struct PersonaRepository {
    pool: DbPool,
}

impl PersonaRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get all personas of a company
    pub fn list_by_company(&self, company_id: &Uuid) -> Result<Vec<Persona>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, company_id, username, bio
             FROM personas
             WHERE company_id = ?
             ORDER BY username",
        )?;

        let personas = stmt
            .query_map([company_id.to_string()], |row| {
                Ok(Persona {
                    id: uuid_at(row, 0)?,
                    company_id: uuid_at(row, 1)?,
                    username: row.get(2)?,
                    bio: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to load personas")?;

        Ok(personas)
    }
}
