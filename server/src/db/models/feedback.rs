//! Feedback Model

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Customer feedback shown on the storefront once approved by an admin
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    pub email: String,
    pub rating: u8,
    pub comment: String,
    #[serde(default)]
    pub approved: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackCreate {
    pub name: String,
    pub email: String,
    pub rating: u8,
    pub comment: String,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}
