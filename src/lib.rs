//! MailPilot - Personalized Email Sending Library
//!
//! MailPilot renders reusable email templates per recipient and sends them
//! individually or in bulk:
//!
//! - **Templates**: Subject/body pairs with `{{variable}}` placeholders
//! - **Substitution**: Literal, single-pass, per-recipient rendering
//! - **Composition**: Logo, signature, and banner injection
//! - **SMTP Support**: Live delivery via lettre, with a mock fallback
//! - **Bulk Sending**: Sequential multi-recipient runs with progress
//! - **History**: Exactly one append-only record per send attempt
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mailpilot::{Contact, MailPilot, MailPilotConfig, Template};
//!
//! #[tokio::main]
//! async fn main() {
//!     let app = MailPilot::new(MailPilotConfig::default());
//!
//!     let contact = app
//!         .contacts()
//!         .add(Contact::new("Ann", "ann@example.com").with_company("Acme"))
//!         .await
//!         .unwrap();
//!
//!     let template = app
//!         .templates()
//!         .create("Welcome", "Hello {{name}}", "Dear {{name}} from {{company}}")
//!         .await
//!         .unwrap();
//!
//!     // Live sending is disabled by default, so this is a mock send.
//!     let outcome = app.send_to_contact(contact.id, template.id).await.unwrap();
//!     assert!(outcome.is_sent());
//! }
//! ```
//!
//! ## Bulk Sending
//!
//! ```rust,ignore
//! use mailpilot::MailPilot;
//!
//! async fn send_campaign(app: &MailPilot, template_id: uuid::Uuid) {
//!     let mut bulk = app.bulk().on_progress(|pct| println!("{pct:.0}%"));
//!
//!     bulk.select_template(template_id).await.unwrap();
//!     for contact in bulk.filtered_contacts().await {
//!         bulk.toggle_contact(contact.id).await.unwrap();
//!     }
//!     bulk.confirm_recipients().unwrap();
//!
//!     let summary = bulk.send_all().await.unwrap();
//!     println!("Sent: {}, Failed: {}", summary.sent, summary.failed);
//! }
//! ```

pub mod models;
pub mod store;
pub mod services;
pub mod app;

// Re-exports
pub use models::{
    BulkEmailResult, BulkSummary, Contact, ContactUpdate, EmailHistory, SendStatus,
    SenderProfile, SmtpSettings, Template, TemplateUpdate,
};

pub use store::{
    ContactError, ContactStore, HistoryError, HistoryRecorder, HistoryStore, SettingsError,
    SettingsStore, TemplateError, TemplateStore,
};

pub use services::{
    substitute, Branding, BulkSendError, BulkSendOrchestrator, BulkState, EmailComposer,
    OutgoingEmail, SendExecutor, SendOutcome, SendTransport, SmtpRelay, TemplateVars,
    TransportError, RECOGNIZED_VARIABLES,
};

pub use app::{MailPilot, MailPilotConfig, SendError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build an application with the default configuration
pub fn init() -> MailPilot {
    MailPilot::new(MailPilotConfig::default())
}
