//! Database models
//!
//! All models serialize with camelCase field names for front-end
//! compatibility. Record ids round-trip as `"table:id"` strings.

pub mod serde_helpers;

pub mod feedback;
pub mod newsletter;
pub mod order;
pub mod product;
pub mod user;

pub use feedback::{Feedback, FeedbackCreate};
pub use newsletter::{NewsletterSubscriber, SubscriberCreate};
pub use order::{
    BillingAddress, NotificationFlags, Order, OrderCreate, OrderId, OrderItem, OrderStatus,
    ShippingAddress,
};
pub use product::{Product, ProductCreate, ProductId, ProductUpdate};
pub use user::{PublicUser, Role, User, UserCreate, UserId};
