//! Order API module

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list_mine).post(handler::create))
        .route("/{id}", axum::routing::delete(handler::delete))
        .route("/{id}/status", patch(handler::set_status))
}
