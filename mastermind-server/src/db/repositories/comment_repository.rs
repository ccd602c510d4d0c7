use anyhow::{Context, Result};

use mastermind_types::Comment;

use crate::db::columns::{format_timestamp, timestamp_at, uuid_at};
use crate::db::DbPool;

/// A stored comment together with its author's username
#[derive(Debug, Clone)]
pub struct AuthoredComment {
    pub comment: Comment,
    pub author: String,
}

pub struct CommentRepository {
    pool: DbPool,
}

impl CommentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert a batch of comments. The batch is all-or-nothing.
    ///
    /// Parents must precede their replies in `comments`.
    pub fn create_many(&self, comments: &[Comment]) -> Result<()> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO comments (id, post_id, parent_comment_id, persona_id, scheduled_at, comment_text)
                 VALUES (?, ?, ?, ?, ?, ?)",
            )?;
            for comment in comments {
                stmt.execute((
                    &comment.id,
                    &comment.post_id,
                    &comment.parent_comment_id,
                    comment.persona_id.to_string(),
                    format_timestamp(&comment.scheduled_at),
                    &comment.comment_text,
                ))
                .with_context(|| format!("Failed to create comment {}", comment.id))?;
            }
        }
        tx.commit().context("Failed to commit comments")?;
        Ok(())
    }

    /// Get all comments of a post in scheduling order
    pub fn list_by_post(&self, post_id: &str) -> Result<Vec<AuthoredComment>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT c.id, c.post_id, c.parent_comment_id, c.persona_id, c.scheduled_at, c.comment_text, pe.username
             FROM comments c
             JOIN personas pe ON c.persona_id = pe.id
             WHERE c.post_id = ?
             ORDER BY c.scheduled_at ASC, c.id ASC",
        )?;

        let comments = stmt
            .query_map([post_id], |row| {
                Ok(AuthoredComment {
                    comment: Comment {
                        id: row.get(0)?,
                        post_id: row.get(1)?,
                        parent_comment_id: row.get(2)?,
                        persona_id: uuid_at(row, 3)?,
                        scheduled_at: timestamp_at(row, 4)?,
                        comment_text: row.get(5)?,
                    },
                    author: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to load comments")?;

        Ok(comments)
    }

    /// Count the comments attached to posts of a week
    pub fn count_by_week(&self, week_id: &uuid::Uuid) -> Result<i64> {
        let conn = self.pool.get()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM comments c JOIN posts p ON c.post_id = p.id WHERE p.week_id = ?",
            [week_id.to_string()],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
