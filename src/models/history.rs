//! Send History Models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome of a single send attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SendStatus {
    /// Email was sent (or mock-sent)
    Sent,
    /// Send attempt failed
    Failed,
}

impl std::fmt::Display for SendStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sent => write!(f, "Sent"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

/// An immutable record of one send attempt.
///
/// Template and contact data are copied by value at send time so entries
/// survive deletion of the originating template or contact. Exactly one
/// entry is written per attempt, success or failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailHistory {
    /// Entry ID
    pub id: Uuid,
    /// Recipient address
    pub to: String,
    /// Recipient name
    pub to_name: String,
    /// Subject as sent
    pub subject: String,
    /// Final rendered and branded HTML body
    pub body: String,
    /// Outcome
    pub status: SendStatus,
    /// Originating template, if any
    pub template_id: Option<Uuid>,
    /// Template name at send time
    pub template_name: Option<String>,
    /// Recipient contact, if any
    pub contact_id: Option<Uuid>,
    /// Contact name at send time
    pub contact_name: Option<String>,
    /// Error message for failed attempts
    pub error: Option<String>,
    /// Attempt timestamp
    pub sent_at: DateTime<Utc>,
}

impl EmailHistory {
    pub fn sent(to: &str, to_name: &str, subject: &str, body: &str) -> Self {
        Self::new(to, to_name, subject, body, SendStatus::Sent)
    }

    pub fn failed(to: &str, to_name: &str, subject: &str, body: &str, error: &str) -> Self {
        let mut entry = Self::new(to, to_name, subject, body, SendStatus::Failed);
        entry.error = Some(error.to_string());
        entry
    }

    fn new(to: &str, to_name: &str, subject: &str, body: &str, status: SendStatus) -> Self {
        Self {
            id: Uuid::now_v7(),
            to: to.to_string(),
            to_name: to_name.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
            status,
            template_id: None,
            template_name: None,
            contact_id: None,
            contact_name: None,
            error: None,
            sent_at: Utc::now(),
        }
    }

    pub fn with_template(mut self, template_id: Uuid, template_name: &str) -> Self {
        self.template_id = Some(template_id);
        self.template_name = Some(template_name.to_string());
        self
    }

    pub fn with_contact(mut self, contact_id: Uuid, contact_name: &str) -> Self {
        self.contact_id = Some(contact_id);
        self.contact_name = Some(contact_name.to_string());
        self
    }
}

/// Per-recipient outcome of a bulk run, in recipient-iteration order.
/// Ephemeral: consumed by the results step, never persisted itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkEmailResult {
    /// Contact ID
    pub contact_id: Uuid,
    /// Contact name
    pub contact_name: String,
    /// Recipient address
    pub email: String,
    /// Outcome
    pub status: SendStatus,
    /// Error message for failed attempts
    pub error: Option<String>,
}

impl BulkEmailResult {
    pub fn sent(contact_id: Uuid, contact_name: &str, email: &str) -> Self {
        Self {
            contact_id,
            contact_name: contact_name.to_string(),
            email: email.to_string(),
            status: SendStatus::Sent,
            error: None,
        }
    }

    pub fn failed(contact_id: Uuid, contact_name: &str, email: &str, error: &str) -> Self {
        Self {
            contact_id,
            contact_name: contact_name.to_string(),
            email: email.to_string(),
            status: SendStatus::Failed,
            error: Some(error.to_string()),
        }
    }
}

/// Aggregate counts for a completed bulk run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkSummary {
    /// Recipients attempted
    pub total: usize,
    /// Successful sends
    pub sent: usize,
    /// Failed sends
    pub failed: usize,
}

impl BulkSummary {
    pub fn from_results(results: &[BulkEmailResult]) -> Self {
        let sent = results.iter().filter(|r| r.status == SendStatus::Sent).count();
        Self {
            total: results.len(),
            sent,
            failed: results.len() - sent,
        }
    }
}
