//! Pricing Module
//!
//! Display-price resolution for catalog listings.

pub mod engine;

pub use engine::{DisplayPricing, PricingCommit, Resolution, resolve, resolve_with_roll};
