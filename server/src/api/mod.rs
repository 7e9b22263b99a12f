//! API route modules
//!
//! # Structure
//!
//! - [`health`] - liveness check
//! - [`auth`] - registration, login, password flows
//! - [`products`] - catalog with resolved pricing
//! - [`orders`] - checkout and order lifecycle
//! - [`admin`] - back-office stats, orders, user management
//! - [`feedback`] - customer testimonials
//! - [`newsletter`] - subscribe/unsubscribe

pub mod admin;
pub mod auth;
pub mod feedback;
pub mod health;
pub mod newsletter;
pub mod orders;
pub mod products;

use axum::Router;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(products::router())
        .merge(orders::router())
        .merge(admin::router())
        .merge(feedback::router())
        .merge(newsletter::router())
}
