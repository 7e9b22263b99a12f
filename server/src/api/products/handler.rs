//! Product API handlers
//!
//! The public listing runs each product through the pricing engine and
//! commits any freshly rolled discount back to storage before
//! responding, so the next read takes the stored figures unchanged.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::auth::AdminUser;
use crate::core::ServerState;
use crate::db::models::{Product, ProductCreate, ProductUpdate};
use crate::db::repository::{ProductRepository, parse_id};
use crate::pricing;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub subcategory: Option<String>,
}

/// Catalog row: the stored product with the resolved discount badge
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductWithPricing {
    #[serde(flatten)]
    pub product: Product,
    pub discount_percentage: u8,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// GET /api/products - catalog with resolved pricing
pub async fn list(
    State(state): State<ServerState>,
    Query(filter): Query<ProductFilter>,
) -> AppResult<Json<Vec<ProductWithPricing>>> {
    let repo = ProductRepository::new(state.db.clone());
    let products = repo
        .find_filtered(filter.category.as_deref(), filter.subcategory.as_deref())
        .await?;

    let mut rows = Vec::with_capacity(products.len());
    for mut product in products {
        let resolution = pricing::resolve(&product);

        if let Some(commit) = &resolution.commit
            && let Some(id) = &product.id
        {
            // A commit failure only delays the write-through; the next
            // listing will roll and commit again.
            if let Err(e) = repo.commit_pricing(id, commit).await {
                tracing::error!(error = %e, product = %id, "failed to persist rolled discount");
            }
        }

        product.price = resolution.pricing.price;
        product.original_price = Some(resolution.pricing.original_price);
        product.discount = resolution.pricing.discount_percentage;

        rows.push(ProductWithPricing {
            product,
            discount_percentage: resolution.pricing.discount_percentage,
        });
    }

    Ok(Json(rows))
}

/// GET /api/products/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let repo = ProductRepository::new(state.db.clone());
    let product = repo
        .find_by_id(&parse_id("product", &id))
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;
    Ok(Json(product))
}

/// POST /api/products
pub async fn create(
    State(state): State<ServerState>,
    _admin: AdminUser,
    Json(payload): Json<ProductCreate>,
) -> AppResult<(StatusCode, Json<Product>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    if payload.price <= 0.0 {
        return Err(AppError::validation("price must be greater than zero"));
    }

    let repo = ProductRepository::new(state.db.clone());
    let product = repo.create(payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/products/{id}
pub async fn update(
    State(state): State<ServerState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    if let Some(price) = payload.price
        && price <= 0.0
    {
        return Err(AppError::validation("price must be greater than zero"));
    }

    let repo = ProductRepository::new(state.db.clone());
    let product = repo
        .update(&parse_id("product", &id), payload)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;
    Ok(Json(product))
}

/// DELETE /api/products/{id}
pub async fn delete(
    State(state): State<ServerState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let repo = ProductRepository::new(state.db.clone());
    repo.delete(&parse_id("product", &id))
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;
    Ok(Json(MessageResponse {
        message: "Product deleted successfully".to_string(),
    }))
}
