//! Newsletter API handlers

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::auth;
use crate::core::ServerState;
use crate::db::models::SubscriberCreate;
use crate::db::repository::{NewsletterRepository, RepoError};
use crate::notify::{MailMessage, templates};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    pub message: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// POST /api/newsletter/subscribe
pub async fn subscribe(
    State(state): State<ServerState>,
    Json(payload): Json<SubscribeRequest>,
) -> AppResult<Json<SubscribeResponse>> {
    // Stored lowercased so FOO@x.com and foo@x.com are the same subscriber
    let email = payload.email.trim().to_lowercase();
    if !email.contains('@') {
        return Err(AppError::validation("Valid email is required"));
    }

    let repo = NewsletterRepository::new(state.db.clone());
    if repo.find_by_email(&email).await?.is_some() {
        return Err(AppError::conflict(
            "Email is already subscribed to our newsletter",
        ));
    }

    let subscriber = repo
        .create(SubscriberCreate {
            email,
            is_active: true,
            subscribed_at: Utc::now(),
        })
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => {
                AppError::conflict("Email is already subscribed to our newsletter")
            }
            other => other.into(),
        })?;

    let token = auth::generate_token();
    repo.set_unsubscribe_token(&subscriber.email, &token).await?;

    if state.notifier.mail_available() {
        let unsubscribe_url = format!(
            "{}/api/newsletter/unsubscribe?token={token}",
            state.notifier.frontend_url()
        );
        let mail = MailMessage {
            to: vec![subscriber.email.clone()],
            subject: templates::newsletter_welcome_subject(),
            html: templates::newsletter_welcome(&unsubscribe_url),
        };
        if let Err(e) = state.notifier.send_mail(mail).await {
            tracing::error!(error = %e, email = %subscriber.email, "newsletter welcome email failed");
        }
    }

    Ok(Json(SubscribeResponse {
        message: "Successfully subscribed to our newsletter!".to_string(),
        email: subscriber.email,
    }))
}

#[derive(Debug, Deserialize)]
pub struct UnsubscribeQuery {
    pub token: Option<String>,
}

/// GET /api/newsletter/unsubscribe?token=...
pub async fn unsubscribe(
    State(state): State<ServerState>,
    Query(query): Query<UnsubscribeQuery>,
) -> AppResult<Json<MessageResponse>> {
    let token = query
        .token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::validation("Unsubscribe token is required"))?;

    let repo = NewsletterRepository::new(state.db.clone());
    let subscriber = repo
        .find_by_unsubscribe_token(&token)
        .await?
        .ok_or_else(|| AppError::not_found("Subscriber not found"))?;

    repo.deactivate(&subscriber.email).await?;

    Ok(Json(MessageResponse {
        message: "Successfully unsubscribed from our newsletter".to_string(),
    }))
}
