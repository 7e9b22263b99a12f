//! Product Model
//!
//! Prices carry a lazily-committed discount: `price` holds the displayed
//! (already discounted) amount once the pricing engine has rolled, with
//! the pre-discount amount preserved in `originalPrice`.

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Product ID type
pub type ProductId = RecordId;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<ProductId>,
    pub name: String,
    pub description: String,
    pub price: f64,
    /// Pre-discount price; set the first time a discount is committed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    /// Committed discount percentage (0 = not yet rolled)
    #[serde(default)]
    pub discount: u8,
    /// Admin-set discount percentage; non-zero overrides randomization
    #[serde(default)]
    pub admin_discount: u8,
    pub category: String,
    /// trending | bestselling | new
    pub subcategory: String,
    #[serde(default)]
    pub image: String,
    pub icon: String,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub in_stock: bool,
    #[serde(default)]
    pub rating: f64,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub admin_discount: u8,
    pub category: String,
    pub subcategory: String,
    #[serde(default)]
    pub image: String,
    pub icon: String,
    #[serde(default = "default_true")]
    pub in_stock: bool,
    #[serde(default)]
    pub rating: f64,
}

/// Update product payload; only present fields are merged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_discount: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}
