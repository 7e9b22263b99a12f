//! Notification Module
//!
//! Best-effort delivery of order and account email plus WhatsApp
//! messages. Channels never block or fail the operation that fired them.

pub mod dispatcher;
pub mod templates;
pub mod transport;

pub use dispatcher::NotificationDispatcher;
pub use transport::{
    HttpMailer, LoggingWhatsApp, MailMessage, MailTransport, TransportError, WhatsAppTransport,
};
