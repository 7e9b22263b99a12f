//! Auth extractors
//!
//! Handlers declare their auth requirement through the argument list:
//! [`AuthUser`] for logged-in endpoints, [`OptionalAuthUser`] where guest
//! checkout is allowed, [`AdminUser`] for the back office. `AdminUser`
//! re-reads the account from the database so a demoted admin is locked
//! out as soon as the role changes, not when the token expires.

use axum::{extract::FromRequestParts, http::request::Parts};
use surrealdb::RecordId;

use crate::auth::{JwtError, JwtService};
use crate::core::ServerState;
use crate::db::models::User;
use crate::db::repository::{UserRepository, parse_id};
use crate::utils::AppError;

/// Identity taken from a validated bearer token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: RecordId,
    pub email: String,
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(JwtService::extract_from_header)
}

fn validate(state: &ServerState, token: &str) -> Result<AuthUser, AppError> {
    match state.jwt.validate_token(token) {
        Ok(claims) => Ok(AuthUser {
            id: parse_id("user", &claims.sub),
            email: claims.email,
        }),
        Err(JwtError::ExpiredToken) => {
            tracing::warn!("rejected expired token");
            Err(AppError::unauthorized())
        }
        Err(e) => {
            tracing::warn!(error = %e, "rejected invalid token");
            Err(AppError::unauthorized())
        }
    }
}

impl FromRequestParts<ServerState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or_else(AppError::unauthorized)?;
        validate(state, token)
    }
}

/// Identity if a valid token was sent, `None` otherwise. Never rejects;
/// a missing or bad token just downgrades the request to guest.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl FromRequestParts<ServerState> for OptionalAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        let user = bearer_token(parts).and_then(|token| validate(state, token).ok());
        Ok(OptionalAuthUser(user))
    }
}

/// Validated token plus a fresh role check against the user table
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub user: User,
}

impl FromRequestParts<ServerState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;

        let repo = UserRepository::new(state.db.clone());
        let user = repo
            .find_by_id(&auth.id)
            .await
            .map_err(AppError::from)?
            .ok_or_else(AppError::unauthorized)?;

        if !user.role.is_admin() {
            return Err(AppError::forbidden("Admin access required."));
        }

        Ok(AdminUser { user })
    }
}
