//! Newsletter API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/newsletter", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/subscribe", post(handler::subscribe))
        .route("/unsubscribe", get(handler::unsubscribe))
}
