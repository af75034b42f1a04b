//! Database Module
//!
//! Embedded SurrealDB bootstrap: opens the RocksDB-backed store, selects the
//! namespace, and defines tables and unique indexes. Schema definition runs
//! exactly once per process start and is idempotent.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

const NAMESPACE: &str = "storefront";
const DATABASE: &str = "catalog";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the store at `db_path` and apply the schema
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        Self::define_schema(&db).await?;

        tracing::info!(path = %db_path, "Database ready (SurrealDB embedded, RocksDB backend)");
        Ok(Self { db })
    }

    /// Define tables and unique indexes (init-once, no teardown)
    async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
        db.query(
            "DEFINE TABLE IF NOT EXISTS product SCHEMALESS;
             DEFINE INDEX IF NOT EXISTS product_slug ON TABLE product COLUMNS slug UNIQUE;
             DEFINE TABLE IF NOT EXISTS category SCHEMALESS;
             DEFINE INDEX IF NOT EXISTS category_name ON TABLE category COLUMNS name UNIQUE;
             DEFINE TABLE IF NOT EXISTS banner SCHEMALESS;",
        )
        .await
        .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?
        .check()
        .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?;
        Ok(())
    }
}
