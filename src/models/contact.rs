//! Contact Models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A person emails can be addressed to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    /// Unique identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Company name
    pub company: Option<String>,
    /// Role or job title
    pub role: Option<String>,
    /// Free-form notes
    pub notes: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    pub fn new(name: &str, email: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: name.to_string(),
            email: email.to_string(),
            company: None,
            role: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_company(mut self, company: &str) -> Self {
        self.company = Some(company.to_string());
        self
    }

    pub fn with_role(mut self, role: &str) -> Self {
        self.role = Some(role.to_string());
        self
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }

    /// Formatted address, e.g. `Jane Smith <jane@example.com>`
    pub fn formatted(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }
}

/// Fields accepted when updating a contact; `None` leaves the field as is
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub role: Option<String>,
    pub notes: Option<String>,
}

/// RFC-lax email check: one `@`, something on both sides, a dot in the domain.
/// Intentionally permissive; the SMTP relay is the final authority.
pub fn is_valid_email(email: &str) -> bool {
    let re = regex::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    re.is_match(email)
}
