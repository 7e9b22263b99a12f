//! Health API handlers

use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::core::ServerState;

/// GET /api/health
pub async fn health(State(state): State<ServerState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "environment": state.config.environment,
        "emailConfigured": state.notifier.mail_available(),
    }))
}
