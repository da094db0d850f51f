//! MailPilot Stores
//!
//! Explicit, injectable repositories over in-memory state. The pipeline
//! receives these by `Arc`, never through globals, so tests can substitute
//! doubles at the seams.

pub mod contact;
pub mod template;
pub mod settings;
pub mod history;

pub use contact::{ContactError, ContactStore};
pub use template::{TemplateError, TemplateStore};
pub use settings::{SettingsError, SettingsStore};
pub use history::{HistoryError, HistoryRecorder, HistoryStore};
