//! Utility module - shared helpers and types
//!
//! # Contents
//!
//! - [`AppError`] / [`AppResult`] - application error type and result alias
//! - [`logger`] - tracing setup
//! - [`validation`] - text limits and payload validation helpers
//! - [`time`] - calendar-day helpers

pub mod error;
pub mod logger;
pub mod result;
pub mod time;
pub mod validation;

pub use error::{AppError, ErrorBody};
pub use result::AppResult;
