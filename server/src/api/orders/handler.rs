//! Order API handlers
//!
//! Checkout accepts an optional bearer token: a valid token associates
//! the order with the caller, while a missing or invalid one downgrades
//! to guest checkout instead of failing the purchase.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::auth::{AdminUser, AuthUser, OptionalAuthUser};
use crate::core::ServerState;
use crate::db::models::{BillingAddress, Order, ShippingAddress};
use crate::orders::{NewOrder, NewOrderItem};
use crate::utils::AppResult;

#[derive(Debug, Deserialize)]
pub struct OrderItemPayload {
    pub product: Option<String>,
    pub quantity: u32,
    pub price: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub items: Vec<OrderItemPayload>,
    pub total: f64,
    pub shipping_address: ShippingAddress,
    #[serde(default)]
    pub billing_address: BillingAddress,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// POST /api/orders
pub async fn create(
    State(state): State<ServerState>,
    OptionalAuthUser(auth): OptionalAuthUser,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<Order>)> {
    let order = state
        .orders
        .create_order(NewOrder {
            user: auth.map(|a| a.id),
            items: payload
                .items
                .into_iter()
                .map(|item| NewOrderItem {
                    product: item.product,
                    quantity: item.quantity,
                    price: item.price,
                })
                .collect(),
            total: payload.total,
            shipping_address: payload.shipping_address,
            billing_address: payload.billing_address,
        })
        .await?;

    state.orders.spawn_creation_notifications(order.clone());

    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/orders - the caller's own orders
pub async fn list_mine(
    State(state): State<ServerState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<Order>>> {
    let orders = state.orders.list_for_user(&auth.id).await?;
    Ok(Json(orders))
}

/// PATCH /api/orders/{id}/status
pub async fn set_status(
    State(state): State<ServerState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<StatusRequest>,
) -> AppResult<Json<Order>> {
    let (order, previous) = state.orders.set_status(&id, &payload.status).await?;
    state
        .orders
        .spawn_status_notifications(order.clone(), previous);
    Ok(Json(order))
}

/// DELETE /api/orders/{id}
pub async fn delete(
    State(state): State<ServerState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state.orders.delete_order(&id).await?;
    Ok(Json(MessageResponse {
        message: "Order deleted successfully".to_string(),
    }))
}
