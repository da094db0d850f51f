//! MailPilot Application
//!
//! The facade wiring stores, executor, and pipeline together. Library
//! users construct a [`MailPilot`], load contacts and templates through
//! its stores, and send through [`send_to_contact`](MailPilot::send_to_contact)
//! or a [`bulk`](MailPilot::bulk) orchestrator.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::models::EmailHistory;
use crate::services::bulk::{BulkSendOrchestrator, DEFAULT_INTER_SEND_DELAY};
use crate::services::compose::{Branding, EmailComposer};
use crate::services::executor::{SendExecutor, SendOutcome};
use crate::services::render::{substitute, TemplateVars};
use crate::services::transport::{OutgoingEmail, SendTransport, SmtpRelay};
use crate::store::{ContactStore, HistoryRecorder, HistoryStore, SettingsStore, TemplateStore};

/// Send pipeline error: the send could not be attempted at all.
///
/// Outcomes of an attempted send are reported as [`SendOutcome`], never as
/// an error.
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    #[error("Contact not found: {0}")]
    ContactNotFound(Uuid),
    #[error("Template not found: {0}")]
    TemplateNotFound(Uuid),
    #[error("Rendered email has an empty subject or body")]
    EmptyContent,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct MailPilotConfig {
    /// Allow real SMTP delivery. When false every send is mocked,
    /// regardless of how complete the SMTP settings are.
    pub live_sending_enabled: bool,
    /// Logo and banner injected into composed emails
    pub branding: Branding,
    /// Pause between consecutive sends in a bulk run
    pub inter_send_delay: Duration,
}

impl Default for MailPilotConfig {
    fn default() -> Self {
        Self {
            live_sending_enabled: false,
            branding: Branding::default(),
            inter_send_delay: DEFAULT_INTER_SEND_DELAY,
        }
    }
}

/// The assembled application
pub struct MailPilot {
    config: MailPilotConfig,
    contacts: Arc<ContactStore>,
    templates: Arc<TemplateStore>,
    settings: Arc<SettingsStore>,
    history: Arc<HistoryStore>,
    executor: Arc<SendExecutor>,
}

impl MailPilot {
    /// Build the application with the lettre SMTP transport
    pub fn new(config: MailPilotConfig) -> Self {
        Self::with_transport(config, Arc::new(SmtpRelay::new()))
    }

    /// Build the application over a custom transport
    pub fn with_transport(config: MailPilotConfig, transport: Arc<dyn SendTransport>) -> Self {
        let executor = Arc::new(SendExecutor::new(transport, config.live_sending_enabled));

        Self {
            config,
            contacts: Arc::new(ContactStore::new()),
            templates: Arc::new(TemplateStore::new()),
            settings: Arc::new(SettingsStore::new()),
            history: Arc::new(HistoryStore::new()),
            executor,
        }
    }

    pub fn contacts(&self) -> &ContactStore {
        &self.contacts
    }

    pub fn templates(&self) -> &TemplateStore {
        &self.templates
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Render and send one template to one contact.
    ///
    /// Returns an error only when the contact or template does not exist
    /// or the rendered subject or body comes out empty; past those
    /// checks the attempt always produces a [`SendOutcome`] and exactly
    /// one history entry.
    pub async fn send_to_contact(
        &self,
        contact_id: Uuid,
        template_id: Uuid,
    ) -> Result<SendOutcome, SendError> {
        let contact = self
            .contacts
            .get(contact_id)
            .await
            .ok_or(SendError::ContactNotFound(contact_id))?;
        let template = self
            .templates
            .get(template_id)
            .await
            .ok_or(SendError::TemplateNotFound(template_id))?;

        let settings = self.settings.smtp().await;
        let profile = self.settings.profile().await;

        let vars = TemplateVars::for_contact(&contact, profile.as_ref());
        let subject = substitute(&template.subject, &vars);
        let body = substitute(&template.body, &vars);

        if subject.trim().is_empty() || body.trim().is_empty() {
            return Err(SendError::EmptyContent);
        }

        let mut composer = EmailComposer::new().with_branding(self.branding_for(&template));
        if let Some(profile) = &profile {
            composer = composer.with_signature(&profile.signature_or_default());
        }
        let html = composer.compose(&body);

        let outgoing = OutgoingEmail {
            to: contact.email.clone(),
            subject: subject.clone(),
            html: html.clone(),
            from: settings.from_address(),
        };

        let outcome = self.executor.send(&outgoing, &settings).await;

        let entry = match &outcome {
            SendOutcome::Sent => EmailHistory::sent(&contact.email, &contact.name, &subject, &html),
            SendOutcome::Failed { reason } => {
                EmailHistory::failed(&contact.email, &contact.name, &subject, &html, reason)
            }
        };
        let entry = entry
            .with_template(template.id, &template.name)
            .with_contact(contact.id, &contact.name);

        if let Err(e) = self.history.record(entry).await {
            tracing::warn!(to = %contact.email, error = %e, "failed to record history entry");
        }

        Ok(outcome)
    }

    /// Start a bulk flow over this application's stores
    pub fn bulk(&self) -> BulkSendOrchestrator {
        BulkSendOrchestrator::new(
            Arc::clone(&self.contacts),
            Arc::clone(&self.templates),
            Arc::clone(&self.settings),
            Arc::clone(&self.history) as Arc<dyn HistoryRecorder>,
            Arc::clone(&self.executor),
        )
        .with_branding(self.config.branding.clone())
        .with_inter_send_delay(self.config.inter_send_delay)
    }

    fn branding_for(&self, template: &crate::models::Template) -> Branding {
        let mut branding = self.config.branding.clone();
        if !template.has_logo {
            branding.logo_url = None;
        }
        branding
    }
}
