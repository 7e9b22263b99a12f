//! Core Module
//!
//! Configuration, shared server state, startup data, and the HTTP
//! server itself.

pub mod bootstrap;
pub mod config;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::Server;
pub use state::ServerState;
