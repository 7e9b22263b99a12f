//! Admin API module

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/stats", get(handler::stats))
        .route("/orders", get(handler::orders))
        .route("/users", get(handler::list_users).post(handler::create_admin))
        .route("/users/{id}/role", patch(handler::update_role))
        .route("/users/{id}", axum::routing::delete(handler::delete_user))
}
