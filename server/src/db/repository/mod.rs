//! Repository Module
//!
//! CRUD access to the SurrealDB tables. Mutations that touch a subset of
//! fields (notification flags, committed pricing, password resets) go
//! through targeted `UPDATE ... SET` statements rather than full-document
//! overwrites, so concurrent partial writes cannot clobber sibling fields.

pub mod feedback;
pub mod newsletter;
pub mod order;
pub mod product;
pub mod user;

pub use feedback::FeedbackRepository;
pub use newsletter::NewsletterRepository;
pub use order::{NotificationChannel, OrderRepository};
pub use product::ProductRepository;
pub use user::UserRepository;

use serde::Deserialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let msg = err.to_string();
        // Unique index violations surface as "already contains" errors
        if msg.contains("already contains") {
            RepoError::Duplicate(msg)
        } else {
            RepoError::Database(msg)
        }
    }
}

impl From<RepoError> for crate::AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => crate::AppError::NotFound(msg),
            RepoError::Duplicate(msg) => crate::AppError::Conflict(msg),
            RepoError::Database(msg) => crate::AppError::Database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

/// Row shape for `SELECT count() ... GROUP ALL`
#[derive(Debug, Deserialize)]
pub(crate) struct CountRow {
    pub count: i64,
}

/// Parse a path-parameter id into a `RecordId`, accepting both the bare
/// key and the full `table:key` form.
pub fn parse_id(table: &str, raw: &str) -> RecordId {
    match raw.parse::<RecordId>() {
        Ok(id) if id.table() == table => id,
        _ => RecordId::from_table_key(table, raw),
    }
}
