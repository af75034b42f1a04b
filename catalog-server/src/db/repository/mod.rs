//! Repository Module
//!
//! Persistence boundary for the three catalog collections. Each repository
//! wraps the shared SurrealDB handle and translates store failures into the
//! [`RepoError`] taxonomy.

pub mod banner;
pub mod category;
pub mod product;

// Re-exports
pub use banner::BannerRepository;
pub use category::CategoryRepository;
pub use product::{ProductFilter, ProductRepository, ProductSort};

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;
use thiserror::Error;

use crate::utils::AppError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let msg = err.to_string();
        // Unique-index violations are the one store failure callers must be
        // able to tell apart from a generic database error
        if msg.contains("already contains") {
            RepoError::Duplicate(msg)
        } else {
            RepoError::Database(msg)
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Parse an identifier that may or may not carry its "table:" prefix
pub fn record_id(table: &str, id: &str) -> RecordId {
    if id.starts_with(&format!("{table}:"))
        && let Ok(rid) = id.parse::<RecordId>()
    {
        return rid;
    }
    RecordId::from_table_key(table, id)
}

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
