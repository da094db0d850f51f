//! Bulk Send Orchestrator
//!
//! Drives the multi-step bulk flow: pick a template, pick recipients,
//! review, send, inspect results. The flow is an explicit tagged-union
//! state machine; each variant carries only the data valid in that step,
//! so states like "results visible while sending" cannot be represented.
//!
//! The send loop is strictly sequential. Recipients are processed in
//! selection order, one at a time, with a fixed pause between sends to
//! stay under provider rate limits. Template and recipient data are
//! captured by value when sending starts, so concurrent store mutation
//! cannot affect an in-flight run.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::models::{BulkEmailResult, BulkSummary, Contact, EmailHistory, Template};
use crate::services::compose::{Branding, EmailComposer};
use crate::services::executor::{SendExecutor, SendOutcome};
use crate::services::render::{substitute, TemplateVars};
use crate::services::transport::OutgoingEmail;
use crate::store::{ContactStore, HistoryRecorder, SettingsStore, TemplateStore};

/// Pause between consecutive sends in a bulk run
pub const DEFAULT_INTER_SEND_DELAY: Duration = Duration::from_millis(500);

/// Bulk flow error
#[derive(Debug, thiserror::Error)]
pub enum BulkSendError {
    #[error("Select at least one recipient")]
    NoRecipients,
    #[error("Cannot {action} from the {step} step")]
    InvalidTransition { step: &'static str, action: &'static str },
    #[error("Template not found: {0}")]
    TemplateNotFound(Uuid),
    #[error("Contact not found: {0}")]
    ContactNotFound(Uuid),
}

/// One step of the bulk flow, carrying only the data valid in that step
#[derive(Debug, Clone)]
pub enum BulkState {
    /// Choosing the template to send
    SelectTemplate,
    /// Choosing recipients for the selected template
    SelectContacts {
        template: Template,
        /// Recipients in selection order
        selected: Vec<Contact>,
    },
    /// Confirming the template and recipient list before sending
    Review {
        template: Template,
        recipients: Vec<Contact>,
    },
    /// Run in progress
    Sending {
        /// Percentage of recipients processed, 0 to 100
        progress: f64,
        /// Outcomes for recipients processed so far
        partial: Vec<BulkEmailResult>,
    },
    /// Run complete
    Results {
        results: Vec<BulkEmailResult>,
        summary: BulkSummary,
    },
}

impl BulkState {
    /// Step name for logs and transition errors
    pub fn step(&self) -> &'static str {
        match self {
            Self::SelectTemplate => "select-template",
            Self::SelectContacts { .. } => "select-contacts",
            Self::Review { .. } => "review",
            Self::Sending { .. } => "sending",
            Self::Results { .. } => "results",
        }
    }
}

/// Progress callback, invoked with a 0 to 100 percentage after each
/// recipient is processed
pub type ProgressFn = Box<dyn Fn(f64) + Send + Sync>;

/// Orchestrates one bulk run end to end.
///
/// Stores are read at step transitions only; the send loop works from
/// value snapshots taken when it starts.
pub struct BulkSendOrchestrator {
    contacts: Arc<ContactStore>,
    templates: Arc<TemplateStore>,
    settings: Arc<SettingsStore>,
    history: Arc<dyn HistoryRecorder>,
    executor: Arc<SendExecutor>,
    branding: Branding,
    inter_send_delay: Duration,
    search_query: String,
    on_progress: Option<ProgressFn>,
    state: BulkState,
}

impl BulkSendOrchestrator {
    pub fn new(
        contacts: Arc<ContactStore>,
        templates: Arc<TemplateStore>,
        settings: Arc<SettingsStore>,
        history: Arc<dyn HistoryRecorder>,
        executor: Arc<SendExecutor>,
    ) -> Self {
        Self {
            contacts,
            templates,
            settings,
            history,
            executor,
            branding: Branding::default(),
            inter_send_delay: DEFAULT_INTER_SEND_DELAY,
            search_query: String::new(),
            on_progress: None,
            state: BulkState::SelectTemplate,
        }
    }

    pub fn with_branding(mut self, branding: Branding) -> Self {
        self.branding = branding;
        self
    }

    pub fn with_inter_send_delay(mut self, delay: Duration) -> Self {
        self.inter_send_delay = delay;
        self
    }

    /// Register a progress callback for the send loop
    pub fn on_progress(mut self, callback: impl Fn(f64) + Send + Sync + 'static) -> Self {
        self.on_progress = Some(Box::new(callback));
        self
    }

    /// Current step of the flow
    pub fn state(&self) -> &BulkState {
        &self.state
    }

    /// Current search filter over the contact list
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Set the search filter used by [`filtered_contacts`](Self::filtered_contacts)
    pub fn set_search_query(&mut self, query: &str) {
        self.search_query = query.to_string();
    }

    /// Contacts matching the current search filter, or all contacts when
    /// the filter is empty
    pub async fn filtered_contacts(&self) -> Vec<Contact> {
        if self.search_query.is_empty() {
            self.contacts.list().await
        } else {
            self.contacts.search(&self.search_query).await
        }
    }

    /// Templates matching the current search filter, or all templates
    /// when the filter is empty
    pub async fn filtered_templates(&self) -> Vec<Template> {
        if self.search_query.is_empty() {
            self.templates.list().await
        } else {
            self.templates.search(&self.search_query).await
        }
    }

    /// Choose the template and advance to recipient selection.
    ///
    /// Clears any active search filter.
    pub async fn select_template(&mut self, id: Uuid) -> Result<(), BulkSendError> {
        if !matches!(self.state, BulkState::SelectTemplate) {
            return Err(BulkSendError::InvalidTransition {
                step: self.state.step(),
                action: "select a template",
            });
        }

        let template = self
            .templates
            .get(id)
            .await
            .ok_or(BulkSendError::TemplateNotFound(id))?;

        self.search_query.clear();
        self.state = BulkState::SelectContacts {
            template,
            selected: Vec::new(),
        };
        Ok(())
    }

    /// Toggle a contact in or out of the recipient set.
    ///
    /// Selection order is preserved; deselecting and reselecting moves a
    /// contact to the end.
    pub async fn toggle_contact(&mut self, id: Uuid) -> Result<(), BulkSendError> {
        if !matches!(self.state, BulkState::SelectContacts { .. }) {
            return Err(BulkSendError::InvalidTransition {
                step: self.state.step(),
                action: "select contacts",
            });
        }

        if let BulkState::SelectContacts { selected, .. } = &mut self.state {
            if let Some(pos) = selected.iter().position(|c| c.id == id) {
                selected.remove(pos);
                return Ok(());
            }
        }

        let contact = self
            .contacts
            .get(id)
            .await
            .ok_or(BulkSendError::ContactNotFound(id))?;

        if let BulkState::SelectContacts { selected, .. } = &mut self.state {
            selected.push(contact);
        }
        Ok(())
    }

    /// Toggle the whole filtered contact list: deselects it when every
    /// filtered contact is already selected, otherwise selects the
    /// missing ones in list order
    pub async fn select_all(&mut self) -> Result<(), BulkSendError> {
        if !matches!(self.state, BulkState::SelectContacts { .. }) {
            return Err(BulkSendError::InvalidTransition {
                step: self.state.step(),
                action: "select contacts",
            });
        }

        let filtered = self.filtered_contacts().await;
        if let BulkState::SelectContacts { selected, .. } = &mut self.state {
            let all_selected = filtered
                .iter()
                .all(|c| selected.iter().any(|s| s.id == c.id));

            if all_selected {
                selected.retain(|s| !filtered.iter().any(|c| c.id == s.id));
            } else {
                for contact in filtered {
                    if !selected.iter().any(|s| s.id == contact.id) {
                        selected.push(contact);
                    }
                }
            }
        }
        Ok(())
    }

    /// Advance to the review step. Rejected, without leaving the current
    /// step, when no recipient is selected.
    pub fn confirm_recipients(&mut self) -> Result<(), BulkSendError> {
        match std::mem::replace(&mut self.state, BulkState::SelectTemplate) {
            BulkState::SelectContacts { template, selected } => {
                if selected.is_empty() {
                    self.state = BulkState::SelectContacts { template, selected };
                    return Err(BulkSendError::NoRecipients);
                }
                self.state = BulkState::Review {
                    template,
                    recipients: selected,
                };
                Ok(())
            }
            other => {
                let step = other.step();
                self.state = other;
                Err(BulkSendError::InvalidTransition { step, action: "review" })
            }
        }
    }

    /// Step back one screen. Permitted from recipient selection and
    /// review only; the selected template and recipients survive a step
    /// back from review, while stepping back to template selection drops
    /// the selection and search filter.
    pub fn back(&mut self) -> Result<(), BulkSendError> {
        match std::mem::replace(&mut self.state, BulkState::SelectTemplate) {
            BulkState::SelectContacts { .. } => {
                self.search_query.clear();
                Ok(())
            }
            BulkState::Review { template, recipients } => {
                self.state = BulkState::SelectContacts {
                    template,
                    selected: recipients,
                };
                Ok(())
            }
            other => {
                let step = other.step();
                self.state = other;
                Err(BulkSendError::InvalidTransition { step, action: "go back" })
            }
        }
    }

    /// Run the send loop over every reviewed recipient.
    ///
    /// Never aborts on a per-recipient failure: each recipient yields one
    /// [`BulkEmailResult`] and one history entry, success or failure, in
    /// selection order. On completion the flow lands on the results step
    /// and the summary is returned.
    pub async fn send_all(&mut self) -> Result<BulkSummary, BulkSendError> {
        let (template, recipients) = match std::mem::replace(
            &mut self.state,
            BulkState::Sending {
                progress: 0.0,
                partial: Vec::new(),
            },
        ) {
            BulkState::Review { template, recipients } => (template, recipients),
            other => {
                let step = other.step();
                self.state = other;
                return Err(BulkSendError::InvalidTransition { step, action: "send" });
            }
        };

        // Snapshots taken once; concurrent saves do not affect this run.
        let settings = self.settings.smtp().await;
        let profile = self.settings.profile().await;
        let composer = self.build_composer(&template);
        let from = settings.from_address();
        let total = recipients.len();

        tracing::info!(
            template = %template.name,
            recipients = total,
            "starting bulk send"
        );

        let mut results: Vec<BulkEmailResult> = Vec::with_capacity(total);

        for (index, contact) in recipients.iter().enumerate() {
            let vars = TemplateVars::for_contact(contact, profile.as_ref());
            let subject = substitute(&template.subject, &vars);
            let html = composer.compose(&substitute(&template.body, &vars));

            let outgoing = OutgoingEmail {
                to: contact.email.clone(),
                subject: subject.clone(),
                html: html.clone(),
                from: from.clone(),
            };

            let outcome = self.executor.send(&outgoing, &settings).await;

            let (result, entry) = match &outcome {
                SendOutcome::Sent => (
                    BulkEmailResult::sent(contact.id, &contact.name, &contact.email),
                    EmailHistory::sent(&contact.email, &contact.name, &subject, &html),
                ),
                SendOutcome::Failed { reason } => {
                    tracing::warn!(to = %contact.email, %reason, "bulk send failed for recipient");
                    (
                        BulkEmailResult::failed(contact.id, &contact.name, &contact.email, reason),
                        // Rendering may not have completed before the fault;
                        // record the raw template content instead.
                        EmailHistory::failed(
                            &contact.email,
                            &contact.name,
                            &template.subject,
                            &template.body,
                            reason,
                        ),
                    )
                }
            };

            let entry = entry
                .with_template(template.id, &template.name)
                .with_contact(contact.id, &contact.name);

            if let Err(e) = self.history.record(entry).await {
                tracing::warn!(to = %contact.email, error = %e, "failed to record history entry");
            }

            results.push(result.clone());

            let progress = ((index + 1) as f64 / total as f64) * 100.0;
            if let BulkState::Sending { progress: p, partial } = &mut self.state {
                *p = progress;
                partial.push(result);
            }
            if let Some(callback) = &self.on_progress {
                callback(progress);
            }

            if index + 1 < total {
                tokio::time::sleep(self.inter_send_delay).await;
            }
        }

        let summary = BulkSummary::from_results(&results);
        tracing::info!(
            total = summary.total,
            sent = summary.sent,
            failed = summary.failed,
            "bulk send complete"
        );

        self.state = BulkState::Results { results, summary: summary.clone() };
        Ok(summary)
    }

    /// Start over. Valid only once a run has finished; clears the
    /// selected template, recipients, search filter, and results.
    pub fn reset(&mut self) -> Result<(), BulkSendError> {
        if !matches!(self.state, BulkState::Results { .. }) {
            return Err(BulkSendError::InvalidTransition {
                step: self.state.step(),
                action: "reset",
            });
        }

        self.search_query.clear();
        self.state = BulkState::SelectTemplate;
        Ok(())
    }

    fn build_composer(&self, template: &Template) -> EmailComposer {
        let mut branding = self.branding.clone();
        if !template.has_logo {
            branding.logo_url = None;
        }
        EmailComposer::new().with_branding(branding)
    }
}
