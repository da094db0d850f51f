//! Send Executor
//!
//! Performs one email transmission, live or mocked. This is the unit of
//! work the bulk orchestrator repeats per recipient, and the boundary past
//! which transport faults never escape: every outcome is a value, so a
//! failure for one recipient cannot abort a run.

use std::sync::Arc;

use crate::models::SmtpSettings;
use crate::services::transport::{OutgoingEmail, SendTransport};

/// The consolidated result of one send attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Delivered (or mock-delivered)
    Sent,
    /// Not delivered; the reason is human-readable
    Failed { reason: String },
}

impl SendOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Sent => None,
            Self::Failed { reason } => Some(reason),
        }
    }
}

/// Dispatches one email, choosing between live and mock delivery.
///
/// Live delivery requires both the process-wide real-sending flag and a
/// complete SMTP configuration; when either is missing the executor falls
/// back to a mock send that logs intent and always succeeds. The fallback
/// is a safety valve for development and demo use, not an error path.
pub struct SendExecutor {
    transport: Arc<dyn SendTransport>,
    live_sending_enabled: bool,
}

impl SendExecutor {
    pub fn new(transport: Arc<dyn SendTransport>, live_sending_enabled: bool) -> Self {
        Self {
            transport,
            live_sending_enabled,
        }
    }

    pub fn live_sending_enabled(&self) -> bool {
        self.live_sending_enabled
    }

    /// Send one email. Never returns an error: transport faults are
    /// converted to [`SendOutcome::Failed`].
    pub async fn send(&self, email: &OutgoingEmail, settings: &SmtpSettings) -> SendOutcome {
        if self.live_sending_enabled && settings.is_complete() {
            match self.transport.send(email, settings).await {
                Ok(()) => SendOutcome::Sent,
                Err(e) => SendOutcome::Failed {
                    reason: e.to_string(),
                },
            }
        } else {
            tracing::info!(to = %email.to, subject = %email.subject, "mock send");
            SendOutcome::Sent
        }
    }
}
