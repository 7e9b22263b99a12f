//! Delivery transports
//!
//! Mail goes out through an HTTP relay; WhatsApp delivery is an
//! integration point that currently logs the composed message. Both sit
//! behind traits so the dispatcher can be exercised with recording
//! doubles in tests.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("mail relay request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("mail relay rejected message: {0}")]
    Rejected(String),
}

/// One outbound email
#[derive(Debug, Clone, Serialize)]
pub struct MailMessage {
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, message: MailMessage) -> Result<(), TransportError>;
}

#[async_trait]
pub trait WhatsAppTransport: Send + Sync {
    async fn send(&self, phone: &str, message: &str) -> Result<(), TransportError>;
}

#[derive(Debug, Serialize)]
struct RelayPayload<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
}

/// Sends mail through an HTTP relay endpoint with basic auth.
pub struct HttpMailer {
    client: reqwest::Client,
    api_url: String,
    from: String,
    user: String,
    pass: String,
}

impl HttpMailer {
    pub fn new(api_url: String, from: String, user: String, pass: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            from,
            user,
            pass,
        }
    }
}

#[async_trait]
impl MailTransport for HttpMailer {
    async fn send(&self, message: MailMessage) -> Result<(), TransportError> {
        let payload = RelayPayload {
            from: &self.from,
            to: &message.to,
            subject: &message.subject,
            html: &message.html,
        };

        let response = self
            .client
            .post(&self.api_url)
            .basic_auth(&self.user, Some(&self.pass))
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Rejected(format!("{status}: {body}")));
        }

        Ok(())
    }
}

/// Stand-in until a WhatsApp Business API provider is wired up; logs the
/// message that would have been sent.
pub struct LoggingWhatsApp;

#[async_trait]
impl WhatsAppTransport for LoggingWhatsApp {
    async fn send(&self, phone: &str, message: &str) -> Result<(), TransportError> {
        tracing::info!(phone, message, "WhatsApp notification (provider not wired up)");
        Ok(())
    }
}
