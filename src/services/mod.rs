//! MailPilot Services
//!
//! The send pipeline, in order of execution: variable substitution,
//! composition, the executor and its transport, and the bulk orchestrator
//! that drives them across many recipients.

pub mod render;
pub mod compose;
pub mod transport;
pub mod executor;
pub mod bulk;

pub use render::{substitute, TemplateVars, RECOGNIZED_VARIABLES};
pub use compose::{Branding, EmailComposer};
pub use transport::{OutgoingEmail, SendTransport, SmtpRelay, TransportError};
pub use executor::{SendExecutor, SendOutcome};
pub use bulk::{BulkSendError, BulkSendOrchestrator, BulkState, DEFAULT_INTER_SEND_DELAY};
