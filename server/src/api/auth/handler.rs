//! Auth API handlers
//!
//! Login and forgot-password deliberately return the same message for
//! "no such account" and "wrong password" to prevent enumeration.

use axum::{Json, extract::State, http::StatusCode};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::{self, AuthUser};
use crate::core::ServerState;
use crate::db::models::{PublicUser, Role, UserCreate};
use crate::db::repository::{RepoError, UserRepository};
use crate::notify::{MailMessage, templates};
use crate::utils::validation::{MIN_PASSWORD_LEN, validate_payload};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 200, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "a valid email is required"))]
    pub email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: PublicUser,
}

fn issue_token(state: &ServerState, user: &crate::db::models::User) -> AppResult<String> {
    let id = user
        .id
        .as_ref()
        .ok_or_else(|| AppError::internal("user record without id"))?;
    state
        .jwt
        .generate_token(&id.to_string(), &user.email)
        .map_err(|e| AppError::internal(format!("token generation failed: {e}")))
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    validate_payload(&payload)?;

    let users = UserRepository::new(state.db.clone());
    if users.find_by_email(&payload.email).await?.is_some() {
        return Err(AppError::conflict("User already exists"));
    }

    let hash = auth::hash_password(&payload.password)
        .map_err(|e| AppError::internal(format!("password hashing failed: {e}")))?;

    let user = users
        .create(UserCreate {
            name: payload.name,
            email: payload.email,
            password: Some(hash),
            google_id: None,
            role: Role::Customer,
            created_at: Utc::now(),
        })
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => AppError::conflict("User already exists"),
            other => other.into(),
        })?;

    let token = issue_token(&state, &user)?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User created successfully".to_string(),
            token,
            user: PublicUser::from(&user),
        }),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let users = UserRepository::new(state.db.clone());
    let user = users
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    // OAuth-only accounts have no password hash
    let hash = user
        .password
        .as_deref()
        .ok_or_else(AppError::invalid_credentials)?;

    let matches = auth::verify_password(&payload.password, hash)
        .map_err(|e| AppError::internal(format!("password verification failed: {e}")))?;
    if !matches {
        return Err(AppError::invalid_credentials());
    }

    let token = issue_token(&state, &user)?;
    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        token,
        user: PublicUser::from(&user),
    }))
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

const RESET_SENT: &str = "If an account with that email exists, a password reset link has been sent.";

/// POST /api/auth/forgot-password
pub async fn forgot_password(
    State(state): State<ServerState>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let users = UserRepository::new(state.db.clone());

    let Some(user) = users.find_by_email(&payload.email).await? else {
        return Ok(Json(MessageResponse {
            message: RESET_SENT.to_string(),
        }));
    };

    if !state.notifier.mail_available() {
        return Err(AppError::unavailable("Email services are not configured."));
    }

    let id = user
        .id
        .as_ref()
        .ok_or_else(|| AppError::internal("user record without id"))?;

    let token = auth::generate_token();
    let expires = Utc::now() + Duration::hours(1);
    users.set_reset_token(id, &token, expires).await?;

    let reset_url = format!(
        "{}/reset-password.html?token={token}",
        state.notifier.frontend_url()
    );
    let mail = MailMessage {
        to: vec![user.email.clone()],
        subject: templates::password_reset_subject(),
        html: templates::password_reset(&reset_url),
    };
    if let Err(e) = state.notifier.send_mail(mail).await {
        tracing::error!(error = %e, "password reset email failed");
        return Err(AppError::unavailable("An error occurred"));
    }

    Ok(Json(MessageResponse {
        message: RESET_SENT.to_string(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

/// POST /api/auth/reset-password
pub async fn reset_password(
    State(state): State<ServerState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    if payload.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(
            "New password must be at least 6 characters long",
        ));
    }

    let users = UserRepository::new(state.db.clone());
    let user = users
        .find_by_valid_reset_token(&payload.token, Utc::now())
        .await?
        .ok_or_else(|| {
            AppError::validation("Password reset token is invalid or has expired.")
        })?;

    let id = user
        .id
        .as_ref()
        .ok_or_else(|| AppError::internal("user record without id"))?;
    let hash = auth::hash_password(&payload.password)
        .map_err(|e| AppError::internal(format!("password hashing failed: {e}")))?;
    users.set_password(id, &hash).await?;

    Ok(Json(MessageResponse {
        message: "Password has been reset successfully.".to_string(),
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// POST /api/auth/change-password
pub async fn change_password(
    State(state): State<ServerState>,
    auth_user: AuthUser,
    Json(payload): Json<ChangePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    if payload.current_password.is_empty() || payload.new_password.is_empty() {
        return Err(AppError::validation(
            "Current password and new password are required",
        ));
    }
    if payload.new_password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(
            "New password must be at least 6 characters long",
        ));
    }

    let users = UserRepository::new(state.db.clone());
    let user = users
        .find_by_id(&auth_user.id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    let hash = user
        .password
        .as_deref()
        .ok_or_else(|| AppError::validation("Current password is incorrect"))?;
    let matches = auth::verify_password(&payload.current_password, hash)
        .map_err(|e| AppError::internal(format!("password verification failed: {e}")))?;
    if !matches {
        return Err(AppError::validation("Current password is incorrect"));
    }

    let new_hash = auth::hash_password(&payload.new_password)
        .map_err(|e| AppError::internal(format!("password hashing failed: {e}")))?;
    users.set_password(&auth_user.id, &new_hash).await?;

    Ok(Json(MessageResponse {
        message: "Password changed successfully".to_string(),
    }))
}
