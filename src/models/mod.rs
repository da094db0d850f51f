//! MailPilot Models

pub mod contact;
pub mod template;
pub mod settings;
pub mod history;

pub use contact::*;
pub use template::*;
pub use settings::*;
pub use history::*;
