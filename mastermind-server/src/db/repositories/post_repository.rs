use anyhow::{Context, Result};
use rusqlite::OptionalExtension;
use std::collections::HashMap;
use uuid::Uuid;

use mastermind_types::{CalendarEntry, Post, RecentPost, ThreadPost};

use crate::db::columns::{format_timestamp, timestamp_at, uuid_at, uuid_list_at};
use crate::db::DbPool;

pub struct PostRepository {
    pool: DbPool,
}

impl PostRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert a batch of posts. The batch is all-or-nothing.
    pub fn create_many(&self, posts: &[Post]) -> Result<()> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO posts (id, week_id, subreddit_id, title, body, author_persona_id, scheduled_at, keyword_ids)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            )?;
            for post in posts {
                let keyword_ids = serde_json::to_string(&post.keyword_ids)?;
                stmt.execute((
                    &post.id,
                    post.week_id.to_string(),
                    post.subreddit_id.to_string(),
                    &post.title,
                    &post.body,
                    post.author_persona_id.to_string(),
                    format_timestamp(&post.scheduled_at),
                    keyword_ids,
                ))
                .with_context(|| format!("Failed to create post {}", post.id))?;
            }
        }
        tx.commit().context("Failed to commit posts")?;
        Ok(())
    }

    /// Get the most recently scheduled posts of a company, newest first
    pub fn recent(&self, company_id: &Uuid, limit: usize) -> Result<Vec<RecentPost>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT p.title, p.subreddit_id, p.author_persona_id, p.keyword_ids
             FROM posts p
             JOIN weeks w ON p.week_id = w.id
             WHERE w.company_id = ?
             ORDER BY p.scheduled_at DESC
             LIMIT ?",
        )?;

        let posts = stmt
            .query_map((company_id.to_string(), limit as i64), |row| {
                Ok(RecentPost {
                    title: row.get(0)?,
                    subreddit_id: uuid_at(row, 1)?,
                    author_persona_id: uuid_at(row, 2)?,
                    keyword_ids: uuid_list_at(row, 3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to load recent posts")?;

        Ok(posts)
    }

    /// Get the posts of a week
    pub fn list_by_week(&self, week_id: &Uuid) -> Result<Vec<Post>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, week_id, subreddit_id, title, body, author_persona_id, scheduled_at, keyword_ids
             FROM posts
             WHERE week_id = ?
             ORDER BY scheduled_at ASC, id ASC",
        )?;

        let posts = stmt
            .query_map([week_id.to_string()], |row| {
                Ok(Post {
                    id: row.get(0)?,
                    week_id: uuid_at(row, 1)?,
                    subreddit_id: uuid_at(row, 2)?,
                    title: row.get(3)?,
                    body: row.get(4)?,
                    author_persona_id: uuid_at(row, 5)?,
                    scheduled_at: timestamp_at(row, 6)?,
                    keyword_ids: uuid_list_at(row, 7)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to load posts")?;

        Ok(posts)
    }

    /// Get the calendar rows of a week, in scheduling order.
    ///
    /// Keyword ids that no longer resolve are shown as the raw id.
    pub fn calendar_for_week(&self, week_id: &Uuid) -> Result<Vec<CalendarEntry>> {
        let conn = self.pool.get()?;

        let mut keyword_stmt = conn.prepare("SELECT id, keyword FROM keywords")?;
        let keyword_names: HashMap<String, String> = keyword_stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<HashMap<_, _>, _>>()
            .context("Failed to load keywords")?;

        let mut stmt = conn.prepare(
            "SELECT p.id, p.scheduled_at, s.name, pe.username, p.title, p.keyword_ids
             FROM posts p
             JOIN subreddits s ON p.subreddit_id = s.id
             JOIN personas pe ON p.author_persona_id = pe.id
             WHERE p.week_id = ?
             ORDER BY p.scheduled_at ASC, p.id ASC",
        )?;

        let entries = stmt
            .query_map([week_id.to_string()], |row| {
                let keywords = uuid_list_at(row, 5)?
                    .into_iter()
                    .map(|id| {
                        let id = id.to_string();
                        keyword_names.get(&id).cloned().unwrap_or(id)
                    })
                    .collect();

                Ok(CalendarEntry {
                    post_id: row.get(0)?,
                    scheduled_at: timestamp_at(row, 1)?,
                    subreddit: row.get(2)?,
                    author: row.get(3)?,
                    title: row.get(4)?,
                    keywords,
                })
            })?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to load calendar")?;

        Ok(entries)
    }

    /// Get a single post with its subreddit name and author username
    pub fn get_thread_post(&self, post_id: &str) -> Result<Option<ThreadPost>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT p.id, p.title, p.body, p.scheduled_at, s.name, pe.username, p.keyword_ids
             FROM posts p
             JOIN subreddits s ON p.subreddit_id = s.id
             JOIN personas pe ON p.author_persona_id = pe.id
             WHERE p.id = ?",
        )?;

        let post = stmt
            .query_row([post_id], |row| {
                Ok(ThreadPost {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    body: row.get(2)?,
                    scheduled_at: timestamp_at(row, 3)?,
                    subreddit: row.get(4)?,
                    author: row.get(5)?,
                    keyword_ids: uuid_list_at(row, 6)?,
                })
            })
            .optional()
            .context("Failed to load post")?;

        Ok(post)
    }

    /// Count the posts of a week
    pub fn count_by_week(&self, week_id: &Uuid) -> Result<i64> {
        let conn = self.pool.get()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM posts WHERE week_id = ?",
            [week_id.to_string()],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
