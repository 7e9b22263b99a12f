//! Order lifecycle
//!
//! Owns creation, status transitions, and deletion. Checkout either
//! fully succeeds (order persisted, 201) or fully fails; notification
//! delivery happens on a detached task afterwards and can never undo or
//! block the order itself.

use std::sync::Arc;

use chrono::Utc;
use surrealdb::RecordId;

use crate::db::models::{
    BillingAddress, NotificationFlags, Order, OrderCreate, OrderItem, OrderStatus, ShippingAddress,
};
use crate::db::repository::{
    OrderRepository, ProductRepository, RepoError, parse_id,
};
use crate::notify::NotificationDispatcher;
use crate::orders::numbering;
use crate::utils::{AppError, AppResult};

/// One line of an incoming checkout payload
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    /// Catalog record id, if the front-end sent one
    pub product: Option<String>,
    pub quantity: u32,
    pub price: f64,
}

/// Checkout payload after auth resolution
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user: Option<RecordId>,
    pub items: Vec<NewOrderItem>,
    pub total: f64,
    pub shipping_address: ShippingAddress,
    pub billing_address: BillingAddress,
}

#[derive(Clone)]
pub struct OrderService {
    orders: OrderRepository,
    products: ProductRepository,
    notifier: Arc<NotificationDispatcher>,
}

impl OrderService {
    pub fn new(
        orders: OrderRepository,
        products: ProductRepository,
        notifier: Arc<NotificationDispatcher>,
    ) -> Self {
        Self {
            orders,
            products,
            notifier,
        }
    }

    /// Validate and persist a new order with a fresh order number.
    ///
    /// A duplicate order number (two checkouts counting the same day's
    /// orders at once) is retried once with a regenerated number before
    /// surfacing; the unique index makes the collision loud instead of
    /// silent.
    pub async fn create_order(&self, new_order: NewOrder) -> AppResult<Order> {
        if new_order.items.is_empty() {
            return Err(AppError::validation("Order must contain at least one item."));
        }
        if new_order.items.iter().any(|item| item.quantity == 0) {
            return Err(AppError::validation("Item quantity must be at least 1."));
        }

        let items = self.snapshot_items(new_order.items).await?;

        let mut attempt = 0;
        loop {
            let now = Utc::now();
            let order_number = numbering::next_order_number(&self.orders, now).await?;

            let create = OrderCreate {
                user: new_order.user.clone(),
                items: items.clone(),
                total: new_order.total,
                status: OrderStatus::Pending,
                order_number: order_number.clone(),
                shipping_address: new_order.shipping_address.clone(),
                billing_address: new_order.billing_address.clone(),
                notifications: NotificationFlags::default(),
                created_at: now,
            };

            match self.orders.create(create).await {
                Ok(order) => {
                    tracing::info!(order = %order.order_number, total = order.total, "order created");
                    return Ok(order);
                }
                Err(RepoError::Duplicate(_)) if attempt == 0 => {
                    tracing::warn!(%order_number, "order number collision, regenerating");
                    attempt += 1;
                }
                // A second collision is a retryable server fault, not a
                // client error.
                Err(RepoError::Duplicate(msg)) => {
                    return Err(AppError::database(format!(
                        "order number collision persisted after retry: {msg}"
                    )));
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Resolve catalog names into the order lines so later notification
    /// rendering needs no joins.
    async fn snapshot_items(&self, items: Vec<NewOrderItem>) -> AppResult<Vec<OrderItem>> {
        let mut snapshots = Vec::with_capacity(items.len());
        for item in items {
            let (product, name) = match item.product {
                Some(raw) => {
                    let id = parse_id("product", &raw);
                    match self.products.find_by_id(&id).await? {
                        Some(found) => (Some(id), found.name),
                        None => {
                            tracing::warn!(product = %id, "order references unknown product");
                            (Some(id), "Unknown item".to_string())
                        }
                    }
                }
                None => (None, "Unknown item".to_string()),
            };
            snapshots.push(OrderItem {
                product,
                name,
                quantity: item.quantity,
                price: item.price,
            });
        }
        Ok(snapshots)
    }

    /// Fire creation-time notifications on a detached task.
    pub fn spawn_creation_notifications(&self, order: Order) {
        let notifier = self.notifier.clone();
        tokio::spawn(async move {
            notifier.notify_order_created(&order).await;
        });
    }

    /// Apply a status change. Returns the updated order and the status
    /// it replaced so the caller can fire change notifications.
    pub async fn set_status(&self, raw_id: &str, label: &str) -> AppResult<(Order, OrderStatus)> {
        let status = OrderStatus::from_label(label)
            .ok_or_else(|| AppError::validation("Invalid status value."))?;

        let id = parse_id("orders", raw_id);
        let current = self
            .orders
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::not_found("Order not found."))?;
        let previous = current.status;

        let updated = self
            .orders
            .set_status(&id, status)
            .await?
            .ok_or_else(|| AppError::not_found("Order not found."))?;

        tracing::info!(order = %updated.order_number, from = %previous, to = %status, "order status updated");
        Ok((updated, previous))
    }

    /// Fire status-change notifications on a detached task.
    pub fn spawn_status_notifications(&self, order: Order, previous: OrderStatus) {
        let notifier = self.notifier.clone();
        tokio::spawn(async move {
            notifier.notify_status_changed(&order, previous).await;
        });
    }

    pub async fn delete_order(&self, raw_id: &str) -> AppResult<Order> {
        let id = parse_id("orders", raw_id);
        self.orders
            .delete(&id)
            .await?
            .ok_or_else(|| AppError::not_found("Order not found."))
    }

    pub async fn list_all(&self) -> AppResult<Vec<Order>> {
        Ok(self.orders.find_all().await?)
    }

    pub async fn list_for_user(&self, user: &RecordId) -> AppResult<Vec<Order>> {
        Ok(self.orders.find_for_user(user).await?)
    }
}
