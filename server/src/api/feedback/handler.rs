//! Feedback API handlers

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{Feedback, FeedbackCreate};
use crate::db::repository::FeedbackRepository;
use crate::utils::AppResult;
use crate::utils::validation::validate_payload;

/// Storefront shows the ten most recent approved entries
const TESTIMONIAL_LIMIT: usize = 10;

#[derive(Debug, Deserialize, Validate)]
pub struct FeedbackRequest {
    #[validate(length(min = 1, max = 200, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "a valid email is required"))]
    pub email: String,
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: u8,
    #[validate(length(min = 1, max = 1000, message = "comment is required"))]
    pub comment: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// POST /api/feedback - submissions start unapproved
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<FeedbackRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    validate_payload(&payload)?;

    let repo = FeedbackRepository::new(state.db.clone());
    repo.create(FeedbackCreate {
        name: payload.name,
        email: payload.email,
        rating: payload.rating,
        comment: payload.comment,
        approved: false,
        created_at: Utc::now(),
    })
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Feedback submitted successfully".to_string(),
        }),
    ))
}

/// GET /api/feedback - approved testimonials
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Feedback>>> {
    let repo = FeedbackRepository::new(state.db.clone());
    Ok(Json(repo.find_approved(TESTIMONIAL_LIMIT).await?))
}
