use uuid::Uuid;

use mastermind_types::{Comment, Company, Keyword, Persona, Post, RecentPost, Subreddit, Week};

use crate::db::repositories::{
    CommentRepository, CompanyRepository, KeywordRepository, PersonaRepository, PostRepository,
    SubredditRepository, WeekRepository,
};
use crate::db::Database;
use crate::error::StoreError;

pub type StoreResult<T> = Result<T, StoreError>;

/// Reads and writes the week generator depends on
pub trait ContentStore {
    /// The single company the planner works for
    fn first_company(&self) -> StoreResult<Option<Company>>;

    fn personas(&self, company_id: &Uuid) -> StoreResult<Vec<Persona>>;

    fn subreddits(&self, company_id: &Uuid) -> StoreResult<Vec<Subreddit>>;

    fn keywords(&self, company_id: &Uuid) -> StoreResult<Vec<Keyword>>;

    /// Week with the highest week_number
    fn latest_week(&self, company_id: &Uuid) -> StoreResult<Option<Week>>;

    /// Up to `limit` posts, newest scheduled first
    fn recent_posts(&self, company_id: &Uuid, limit: usize) -> StoreResult<Vec<RecentPost>>;

    /// Must reject a second week with the same company and week_number
    fn insert_week(&self, week: &Week) -> StoreResult<()>;

    fn insert_posts(&self, posts: &[Post]) -> StoreResult<()>;

    fn insert_comments(&self, comments: &[Comment]) -> StoreResult<()>;
}

/// [`ContentStore`] backed by the SQLite repositories
#[derive(Clone)]
pub struct SqliteContentStore {
    db: Database,
}

impl SqliteContentStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl ContentStore for SqliteContentStore {
    fn first_company(&self) -> StoreResult<Option<Company>> {
        Ok(CompanyRepository::new(self.db.pool.clone()).first()?)
    }

    fn personas(&self, company_id: &Uuid) -> StoreResult<Vec<Persona>> {
        Ok(PersonaRepository::new(self.db.pool.clone()).list_by_company(company_id)?)
    }

    fn subreddits(&self, company_id: &Uuid) -> StoreResult<Vec<Subreddit>> {
        Ok(SubredditRepository::new(self.db.pool.clone()).list_by_company(company_id)?)
    }

    fn keywords(&self, company_id: &Uuid) -> StoreResult<Vec<Keyword>> {
        Ok(KeywordRepository::new(self.db.pool.clone()).list_by_company(company_id)?)
    }

    fn latest_week(&self, company_id: &Uuid) -> StoreResult<Option<Week>> {
        Ok(WeekRepository::new(self.db.pool.clone()).latest(company_id)?)
    }

    fn recent_posts(&self, company_id: &Uuid, limit: usize) -> StoreResult<Vec<RecentPost>> {
        Ok(PostRepository::new(self.db.pool.clone()).recent(company_id, limit)?)
    }

    fn insert_week(&self, week: &Week) -> StoreResult<()> {
        Ok(WeekRepository::new(self.db.pool.clone()).create(week)?)
    }

    fn insert_posts(&self, posts: &[Post]) -> StoreResult<()> {
        Ok(PostRepository::new(self.db.pool.clone()).create_many(posts)?)
    }

    fn insert_comments(&self, comments: &[Comment]) -> StoreResult<()> {
        Ok(CommentRepository::new(self.db.pool.clone()).create_many(comments)?)
    }
}
