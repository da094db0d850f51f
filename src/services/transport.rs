//! Send Transport
//!
//! The network seam of the pipeline. The executor talks to a
//! [`SendTransport`], which is the lettre SMTP relay in production and a
//! test double everywhere else.

use std::time::Duration;
use async_trait::async_trait;
use lettre::{
    message::header::ContentType,
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::models::SmtpSettings;

/// Transport error
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Connection error: {0}")]
    Connection(String),
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    #[error("Send error: {0}")]
    Send(String),
}

/// One outbound message, fully rendered
#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    /// Recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// Final HTML body
    pub html: String,
    /// Formatted sender, e.g. `Jane Smith <jane@example.com>`
    pub from: String,
}

/// A collaborator that delivers one email given server credentials
#[async_trait]
pub trait SendTransport: Send + Sync {
    async fn send(&self, email: &OutgoingEmail, settings: &SmtpSettings)
        -> Result<(), TransportError>;
}

/// SMTP delivery via lettre.
///
/// The relay is built from the settings snapshot on every send; the
/// pipeline holds no long-lived connection.
pub struct SmtpRelay {
    timeout_secs: u64,
}

impl SmtpRelay {
    pub fn new() -> Self {
        Self { timeout_secs: 30 }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    fn build_transport(
        &self,
        settings: &SmtpSettings,
    ) -> Result<AsyncSmtpTransport<Tokio1Executor>, TransportError> {
        let builder = if settings.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
                .map_err(|e| TransportError::Connection(e.to_string()))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
        };

        let creds = Credentials::new(settings.username.clone(), settings.password.clone());

        Ok(builder
            .port(settings.port)
            .credentials(creds)
            .timeout(Some(Duration::from_secs(self.timeout_secs)))
            .build())
    }

    fn build_message(&self, email: &OutgoingEmail) -> Result<Message, TransportError> {
        let from: lettre::message::Mailbox = email
            .from
            .parse()
            .map_err(|e: lettre::address::AddressError| {
                TransportError::InvalidAddress(e.to_string())
            })?;

        let to: lettre::message::Mailbox = email
            .to
            .parse()
            .map_err(|e: lettre::address::AddressError| {
                TransportError::InvalidAddress(e.to_string())
            })?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(&email.subject)
            .header(ContentType::TEXT_HTML)
            .body(email.html.clone())
            .map_err(|e| TransportError::InvalidAddress(e.to_string()))
    }
}

impl Default for SmtpRelay {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SendTransport for SmtpRelay {
    async fn send(
        &self,
        email: &OutgoingEmail,
        settings: &SmtpSettings,
    ) -> Result<(), TransportError> {
        let transport = self.build_transport(settings)?;
        let message = self.build_message(email)?;

        transport
            .send(message)
            .await
            .map_err(|e| TransportError::Send(e.to_string()))?;

        Ok(())
    }
}
