//! Admin API handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::{self, AdminUser};
use crate::core::ServerState;
use crate::db::models::{Order, PublicUser, Role, User, UserCreate};
use crate::db::repository::{RepoError, UserRepository, parse_id};
use crate::notify::{MailMessage, templates};
use crate::stats::AdminStats;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// GET /api/admin/stats
pub async fn stats(
    State(state): State<ServerState>,
    _admin: AdminUser,
) -> AppResult<Json<AdminStats>> {
    Ok(Json(state.stats.collect().await?))
}

/// GET /api/admin/orders - every order, newest first
pub async fn orders(
    State(state): State<ServerState>,
    _admin: AdminUser,
) -> AppResult<Json<Vec<Order>>> {
    Ok(Json(state.orders.list_all().await?))
}

/// Row shape for the admin user table
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for AdminUserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<ServerState>,
    _admin: AdminUser,
) -> AppResult<Json<Vec<AdminUserRow>>> {
    let users = UserRepository::new(state.db.clone());
    let all = users.find_all().await?;
    Ok(Json(all.iter().map(AdminUserRow::from).collect()))
}

#[derive(Debug, Deserialize)]
pub struct CreateAdminRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminResponse {
    pub message: String,
    pub user: PublicUser,
    /// Returned for immediate display; the welcome email carries it too
    pub temp_password: String,
}

/// POST /api/admin/users - create a back-office account with a generated
/// temporary password
pub async fn create_admin(
    State(state): State<ServerState>,
    _admin: AdminUser,
    Json(payload): Json<CreateAdminRequest>,
) -> AppResult<(StatusCode, Json<CreateAdminResponse>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    if !payload.email.contains('@') {
        return Err(AppError::validation("Valid email is required"));
    }

    let users = UserRepository::new(state.db.clone());
    if users.find_by_email(&payload.email).await?.is_some() {
        return Err(AppError::conflict("User with this email already exists"));
    }

    let temp_password = auth::generate_temp_password();
    let hash = auth::hash_password(&temp_password)
        .map_err(|e| AppError::internal(format!("password hashing failed: {e}")))?;

    let user = users
        .create(UserCreate {
            name: payload.name.clone(),
            email: payload.email.clone(),
            password: Some(hash),
            google_id: None,
            role: Role::Admin,
            created_at: Utc::now(),
        })
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => AppError::conflict("User with this email already exists"),
            other => other.into(),
        })?;

    if state.notifier.mail_available() {
        let mail = MailMessage {
            to: vec![user.email.clone()],
            subject: templates::admin_welcome_subject(),
            html: templates::admin_welcome(
                &user.name,
                &user.email,
                &temp_password,
                state.notifier.frontend_url(),
            ),
        };
        if let Err(e) = state.notifier.send_mail(mail).await {
            tracing::error!(error = %e, email = %user.email, "admin welcome email failed");
        }
    }

    Ok((
        StatusCode::CREATED,
        Json(CreateAdminResponse {
            message: "Admin user created successfully".to_string(),
            user: PublicUser::from(&user),
            temp_password,
        }),
    ))
}

#[derive(Debug, Deserialize)]
pub struct RoleRequest {
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub message: String,
    pub user: PublicUser,
}

/// PATCH /api/admin/users/{id}/role
pub async fn update_role(
    State(state): State<ServerState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<RoleRequest>,
) -> AppResult<Json<UserResponse>> {
    let role = Role::from_label(&payload.role)
        .ok_or_else(|| AppError::validation("Invalid role"))?;

    let users = UserRepository::new(state.db.clone());
    let user = users
        .update_role(&parse_id("user", &id), role)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(UserResponse {
        message: "User role updated successfully".to_string(),
        user: PublicUser::from(&user),
    }))
}

/// DELETE /api/admin/users/{id}
///
/// Refuses to delete the last remaining admin so the back office can
/// never lock itself out.
pub async fn delete_user(
    State(state): State<ServerState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let users = UserRepository::new(state.db.clone());
    let record_id = parse_id("user", &id);

    let user = users
        .find_by_id(&record_id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    if user.role.is_admin() && users.count_admins().await? <= 1 {
        return Err(AppError::validation("Cannot delete the last admin user"));
    }

    users.delete(&record_id).await?;
    Ok(Json(MessageResponse {
        message: "User deleted successfully".to_string(),
    }))
}
