//! Orders Module
//!
//! Order numbering and the order lifecycle service.

pub mod numbering;
pub mod service;

pub use service::{NewOrder, NewOrderItem, OrderService};
