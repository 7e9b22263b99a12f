//! Schema definitions
//!
//! Tables are schemaless documents; the indexes below are load-bearing:
//! the UNIQUE index on `orders.orderNumber` is the last line of defense
//! against the count-then-insert race in order numbering.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

pub async fn define(db: &Surreal<Db>) -> Result<(), surrealdb::Error> {
    db.query(
        r#"
        DEFINE TABLE IF NOT EXISTS user SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS uniq_user_email ON TABLE user COLUMNS email UNIQUE;

        DEFINE TABLE IF NOT EXISTS product SCHEMALESS;

        DEFINE TABLE IF NOT EXISTS orders SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS uniq_order_number ON TABLE orders COLUMNS orderNumber UNIQUE;

        DEFINE TABLE IF NOT EXISTS feedback SCHEMALESS;

        DEFINE TABLE IF NOT EXISTS newsletter_subscriber SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS uniq_subscriber_email ON TABLE newsletter_subscriber COLUMNS email UNIQUE;
        "#,
    )
    .await?
    .check()?;
    Ok(())
}
