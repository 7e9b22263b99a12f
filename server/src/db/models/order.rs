//! Order Model
//!
//! Field names (camelCase, `notifications.*`, `orderNumber`) are part of
//! the front-end contract and must not change.

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Order ID type
pub type OrderId = RecordId;

/// Order status. The three labels are the only valid values; transitions
/// among them are unrestricted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    #[serde(rename = "In Process")]
    InProcess,
    Completed,
}

impl OrderStatus {
    /// Parse an incoming status label; anything outside the three-value
    /// enum is a validation error at the call site.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Pending" => Some(OrderStatus::Pending),
            "In Process" => Some(OrderStatus::InProcess),
            "Completed" => Some(OrderStatus::Completed),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::InProcess => "In Process",
            OrderStatus::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Line item with the unit price snapshotted at purchase time. The name is
/// snapshotted too so notifications render without a catalog join.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub product: Option<RecordId>,
    #[serde(default)]
    pub name: String,
    pub quantity: u32,
    pub price: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShippingAddress {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub zip_code: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BillingAddress {
    pub name: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub zip_code: String,
}

/// Per-channel delivery flags, set only for creation-time notifications
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationFlags {
    pub email_sent: bool,
    pub whatsapp_sent: bool,
    pub admin_notified: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<OrderId>,
    /// Absent for guest checkout
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub user: Option<RecordId>,
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub status: OrderStatus,
    /// Unique, assigned exactly once at creation
    pub order_number: String,
    pub shipping_address: ShippingAddress,
    #[serde(default)]
    pub billing_address: BillingAddress,
    #[serde(default)]
    pub notifications: NotificationFlags,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// Create payload written to the database; the order number has already
/// been generated by the numbering step.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    /// Stored as a native record link so `WHERE user = $user` matches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<RecordId>,
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub status: OrderStatus,
    pub order_number: String,
    pub shipping_address: ShippingAddress,
    pub billing_address: BillingAddress,
    pub notifications: NotificationFlags,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_labels_round_trip() {
        for label in ["Pending", "In Process", "Completed"] {
            let status = OrderStatus::from_label(label).unwrap();
            assert_eq!(status.label(), label);
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{label}\""));
        }
        assert!(OrderStatus::from_label("Shipped").is_none());
        assert!(OrderStatus::from_label("pending").is_none());
    }

    #[test]
    fn notification_flags_serialize_camel_case() {
        let json = serde_json::to_value(NotificationFlags::default()).unwrap();
        assert_eq!(json["emailSent"], false);
        assert_eq!(json["whatsappSent"], false);
        assert_eq!(json["adminNotified"], false);
    }
}
