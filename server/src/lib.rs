//! Falak Perfumes Server - storefront and admin back office
//!
//! # Architecture overview
//!
//! - **Database** (`db`): embedded SurrealDB storage, models, repositories
//! - **Auth** (`auth`): JWT + Argon2, customer/admin extractors
//! - **Pricing** (`pricing`): lazily committed discount resolution
//! - **Orders** (`orders`): order numbering and lifecycle
//! - **Notifications** (`notify`): best-effort email/WhatsApp fan-out
//! - **Stats** (`stats`): admin dashboard aggregates
//! - **HTTP API** (`api`): RESTful handlers under `/api`
//!
//! # Module structure
//!
//! ```text
//! server/src/
//! ├── core/          # config, state, bootstrap, server
//! ├── auth/          # JWT, password hashing, extractors
//! ├── pricing/       # discount engine
//! ├── orders/        # numbering + lifecycle service
//! ├── notify/        # transports, templates, dispatcher
//! ├── stats/         # admin aggregates
//! ├── api/           # HTTP routes and handlers
//! ├── utils/         # errors, logging, validation
//! └── db/            # database layer
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod notify;
pub mod orders;
pub mod pricing;
pub mod stats;
pub mod utils;

// Re-export common types
pub use auth::JwtService;
pub use core::{Config, Server, ServerState};
pub use notify::NotificationDispatcher;
pub use orders::OrderService;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
    ______      __      __
   / ____/___ _/ /___ _/ /__
  / /_  / __ `/ / __ `/ //_/
 / __/ / /_/ / / /_/ / ,<
/_/    \__,_/_/\__,_/_/|_|
    "#
    );
}
