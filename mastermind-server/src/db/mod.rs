pub mod schema;
pub mod connection;
pub mod columns;
pub mod repositories;

pub use connection::{Database, DbPool};
