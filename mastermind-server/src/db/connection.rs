use anyhow::{Context, Result};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;

use super::schema::{SCHEMA, TEST_DATA};

/// SQLite in-memory database identifier
const MEMORY_DB_PATH: &str = ":memory:";

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConnection = PooledConnection<SqliteConnectionManager>;

/// Database wrapper with connection pooling support
#[derive(Clone)]
pub struct Database {
    pub pool: DbPool,
}

impl Database {
    /// Create a new database connection pool
    ///
    /// Every in-memory connection is its own database, so `:memory:` pools
    /// hold exactly one connection that is never recycled.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let (manager, is_memory) = Self::create_connection_manager(path);
        let manager = manager.with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));

        let mut builder = Pool::builder();
        if is_memory {
            builder = builder.max_size(1).idle_timeout(None).max_lifetime(None);
        }
        let pool = builder
            .build(manager)
            .context("Failed to create database connection pool")?;
        Ok(Self { pool })
    }

    /// Create appropriate connection manager based on path
    ///
    /// # Arguments
    /// * `path` - Database file path or ":memory:" for in-memory database
    ///
    /// # Returns
    /// * `SqliteConnectionManager` configured for file or memory storage, and
    ///   whether it is in-memory
    fn create_connection_manager<P: AsRef<Path>>(path: P) -> (SqliteConnectionManager, bool) {
        let path_str = path.as_ref().to_string_lossy();
        let trimmed_path = path_str.trim();

        if trimmed_path.eq_ignore_ascii_case(MEMORY_DB_PATH) {
            (SqliteConnectionManager::memory(), true)
        } else {
            (SqliteConnectionManager::file(path), false)
        }
    }

    /// Create an in-memory database pool (useful for testing)
    pub fn in_memory() -> Result<Self> {
        Self::new(MEMORY_DB_PATH)
    }

    /// Initialize the database schema
    pub fn initialize(&self) -> Result<()> {
        let conn = self.connection()?;
        conn.execute_batch(SCHEMA)
            .context("Failed to initialize database schema")?;
        Ok(())
    }

    /// Seed the database with demo data
    pub fn seed_test_data(&self) -> Result<()> {
        let conn = self.connection()?;
        conn.execute_batch(TEST_DATA)
            .context("Failed to seed test data")?;
        Ok(())
    }

    /// Get a connection from the pool
    pub fn connection(&self) -> Result<DbConnection> {
        self.pool
            .get()
            .context("Failed to get database connection from pool")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_creation() {
        let db = Database::in_memory().expect("Failed to create database");
        db.initialize().expect("Failed to initialize schema");

        // Verify tables exist
        let conn = db.connection().expect("Failed to get connection");
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table'")
            .expect("Failed to prepare statement");

        let tables: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .expect("Failed to query tables")
            .collect::<Result<Vec<_>, _>>()
            .expect("Failed to collect tables");

        for table in ["companies", "personas", "subreddits", "keywords", "weeks", "posts", "comments"] {
            assert!(tables.contains(&table.to_string()), "missing table {}", table);
        }
    }

    #[test]
    fn test_seed_test_data() {
        let db = Database::in_memory().expect("Failed to create database");
        db.initialize().expect("Failed to initialize schema");
        db.seed_test_data().expect("Failed to seed test data");
        // Seeding twice must be harmless
        db.seed_test_data().expect("Failed to re-seed test data");

        let conn = db.connection().expect("Failed to get connection");
        let count = |table: &str| -> i64 {
            conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))
                .expect("Failed to count rows")
        };

        assert_eq!(count("companies"), 1);
        assert_eq!(count("personas"), 6);
        assert_eq!(count("subreddits"), 5);
        assert_eq!(count("keywords"), 10);
    }

    #[test]
    fn test_memory_database_detection() {
        let memory_paths = [":memory:", " :memory: ", ":MEMORY:", " :Memory: "];

        for path in &memory_paths {
            let db = Database::new(path).expect("Failed to create memory database");
            db.initialize().expect("Failed to initialize schema");
            assert_eq!(db.pool.max_size(), 1);
        }

        let temp_path = std::env::temp_dir().join(format!("mastermind-{}.db", uuid::Uuid::new_v4()));
        let db = Database::new(&temp_path).expect("Failed to create file database");
        db.initialize().expect("Failed to initialize file schema");
        assert!(db.pool.max_size() > 1);

        let _ = std::fs::remove_file(temp_path);
    }

    #[test]
    fn test_week_number_is_unique_per_company() {
        let db = Database::in_memory().expect("Failed to create database");
        db.initialize().expect("Failed to initialize schema");
        db.seed_test_data().expect("Failed to seed test data");

        let conn = db.connection().expect("Failed to get connection");
        let insert = |id: &str| {
            conn.execute(
                "INSERT INTO weeks (id, company_id, week_start, week_number, created_at)
                 VALUES (?, '7a1c0000-0000-4000-8000-000000000001', '2026-10-12', 1, '2026-10-12T00:00:00Z')",
                [id],
            )
        };

        assert!(insert("week-a").is_ok());
        assert!(insert("week-b").is_err());
    }
}
