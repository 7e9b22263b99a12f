//! Order Repository
//!
//! The `orderNumber` column carries a UNIQUE index; inserts racing on the
//! same daily sequence fail with [`RepoError::Duplicate`] and the caller
//! (order creation) regenerates and retries once.

use chrono::{DateTime, Utc};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, CountRow, RepoError, RepoResult};
use crate::db::models::{Order, OrderCreate, OrderId, OrderStatus};

/// Creation-time notification channels tracked on the order document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationChannel {
    Email,
    WhatsApp,
    Admin,
}

impl NotificationChannel {
    fn flag_field(&self) -> &'static str {
        match self {
            NotificationChannel::Email => "notifications.emailSent",
            NotificationChannel::WhatsApp => "notifications.whatsappSent",
            NotificationChannel::Admin => "notifications.adminNotified",
        }
    }
}

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, data: OrderCreate) -> RepoResult<Order> {
        let created: Option<Order> = self.base.db().create("orders").content(data).await?;
        created.ok_or_else(|| RepoError::Database("order insert returned nothing".into()))
    }

    pub async fn find_by_id(&self, id: &OrderId) -> RepoResult<Option<Order>> {
        let order: Option<Order> = self.base.db().select(id.clone()).await?;
        Ok(order)
    }

    /// Admin view: every order, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM orders ORDER BY createdAt DESC")
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Customer view: the caller's own orders, newest first
    pub async fn find_for_user(&self, user: &surrealdb::RecordId) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM orders WHERE user = $user ORDER BY createdAt DESC")
            .bind(("user", user.clone()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Orders created within `[start, end)`; feeds the daily sequence
    pub async fn count_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepoResult<i64> {
        let row: Option<CountRow> = self
            .base
            .db()
            .query(
                "SELECT count() AS count FROM orders \
                 WHERE createdAt >= $start AND createdAt < $end GROUP ALL",
            )
            .bind(("start", start))
            .bind(("end", end))
            .await?
            .take(0)?;
        Ok(row.map(|r| r.count).unwrap_or(0))
    }

    pub async fn set_status(&self, id: &OrderId, status: OrderStatus) -> RepoResult<Option<Order>> {
        let updated: Option<Order> = self
            .base
            .db()
            .update(id.clone())
            .merge(serde_json::json!({ "status": status.label() }))
            .await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: &OrderId) -> RepoResult<Option<Order>> {
        let deleted: Option<Order> = self.base.db().delete(id.clone()).await?;
        Ok(deleted)
    }

    /// Mark one delivery flag true without touching its siblings. Each
    /// channel only ever writes its own field, so concurrent flag writes
    /// cannot lose each other.
    pub async fn mark_notified(&self, id: &OrderId, channel: NotificationChannel) -> RepoResult<()> {
        self.base
            .db()
            .query(format!("UPDATE $order SET {} = true", channel.flag_field()))
            .bind(("order", id.clone()))
            .await?
            .check()?;
        Ok(())
    }
}
