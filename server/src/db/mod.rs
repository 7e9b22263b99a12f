//! Database Module
//!
//! Embedded SurrealDB storage: RocksDB on disk in production, in-memory
//! engine for tests.

pub mod models;
pub mod repository;
pub mod schema;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "falak";
const DATABASE: &str = "store";

/// Open (or create) the on-disk database and apply schema definitions.
pub async fn connect(path: &str) -> Result<Surreal<Db>, surrealdb::Error> {
    let db = Surreal::new::<RocksDb>(path).await?;
    db.use_ns(NAMESPACE).use_db(DATABASE).await?;
    schema::define(&db).await?;
    tracing::info!(path, "Database connection established (SurrealDB/RocksDB)");
    Ok(db)
}

/// In-memory database with the same schema; used by tests.
pub async fn connect_memory() -> Result<Surreal<Db>, surrealdb::Error> {
    let db = Surreal::new::<Mem>(()).await?;
    db.use_ns(NAMESPACE).use_db(DATABASE).await?;
    schema::define(&db).await?;
    Ok(db)
}
