//! Contact Store

use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{contact::is_valid_email, Contact, ContactUpdate};

/// Contact store error
#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error("Contact not found: {0}")]
    NotFound(Uuid),
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
}

/// In-memory contact repository.
///
/// Duplicate email addresses are allowed; contacts are unique by ID only.
pub struct ContactStore {
    contacts: Arc<RwLock<Vec<Contact>>>,
}

impl ContactStore {
    pub fn new() -> Self {
        Self {
            contacts: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Add a contact, validating its email address
    pub async fn add(&self, contact: Contact) -> Result<Contact, ContactError> {
        if !is_valid_email(&contact.email) {
            return Err(ContactError::InvalidEmail(contact.email));
        }

        let mut contacts = self.contacts.write().await;
        contacts.push(contact.clone());
        Ok(contact)
    }

    /// Update a contact, refreshing its `updated_at`
    pub async fn update(&self, id: Uuid, update: ContactUpdate) -> Result<Contact, ContactError> {
        if let Some(email) = &update.email {
            if !is_valid_email(email) {
                return Err(ContactError::InvalidEmail(email.clone()));
            }
        }

        let mut contacts = self.contacts.write().await;
        let contact = contacts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(ContactError::NotFound(id))?;

        if let Some(name) = update.name {
            contact.name = name;
        }
        if let Some(email) = update.email {
            contact.email = email;
        }
        if let Some(company) = update.company {
            contact.company = Some(company);
        }
        if let Some(role) = update.role {
            contact.role = Some(role);
        }
        if let Some(notes) = update.notes {
            contact.notes = Some(notes);
        }
        contact.updated_at = chrono::Utc::now();

        Ok(contact.clone())
    }

    /// Delete a contact
    pub async fn delete(&self, id: Uuid) -> Result<(), ContactError> {
        let mut contacts = self.contacts.write().await;
        let before = contacts.len();
        contacts.retain(|c| c.id != id);

        if contacts.len() == before {
            return Err(ContactError::NotFound(id));
        }
        Ok(())
    }

    /// Get a contact by ID
    pub async fn get(&self, id: Uuid) -> Option<Contact> {
        let contacts = self.contacts.read().await;
        contacts.iter().find(|c| c.id == id).cloned()
    }

    /// List all contacts in insertion order
    pub async fn list(&self) -> Vec<Contact> {
        let contacts = self.contacts.read().await;
        contacts.clone()
    }

    /// Search by name, email, or company, case-insensitive
    pub async fn search(&self, query: &str) -> Vec<Contact> {
        let query_lower = query.to_lowercase();
        let contacts = self.contacts.read().await;

        contacts
            .iter()
            .filter(|c| {
                c.name.to_lowercase().contains(&query_lower)
                    || c.email.to_lowercase().contains(&query_lower)
                    || c.company
                        .as_deref()
                        .map_or(false, |co| co.to_lowercase().contains(&query_lower))
            })
            .cloned()
            .collect()
    }

    /// Number of stored contacts
    pub async fn len(&self) -> usize {
        let contacts = self.contacts.read().await;
        contacts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for ContactStore {
    fn default() -> Self {
        Self::new()
    }
}
