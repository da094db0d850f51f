//! Variable Substitution Engine
//!
//! Replaces `{{key}}` placeholders in template text with per-recipient
//! values. Replacement is literal (templates are HTML bodies, values are
//! injected verbatim), case-sensitive, and single-pass: a substituted value
//! containing `{{var}}` is never re-processed, and placeholders whose key is
//! not recognized are left untouched.

use regex::{Captures, Regex};

use crate::models::{Contact, SenderProfile};

/// Placeholder keys the engine recognizes
pub const RECOGNIZED_VARIABLES: [&str; 7] =
    ["name", "email", "company", "role", "sender", "signature", "date"];

/// Per-recipient values for the recognized placeholder keys
#[derive(Debug, Clone, Default)]
pub struct TemplateVars {
    pub name: String,
    pub email: String,
    pub company: String,
    pub role: String,
    pub sender: String,
    pub signature: String,
    pub date: String,
}

impl TemplateVars {
    /// Build the variable set for one contact, with the sending user's
    /// profile filling `sender` and `signature` when available
    pub fn for_contact(contact: &Contact, profile: Option<&SenderProfile>) -> Self {
        Self {
            name: contact.name.clone(),
            email: contact.email.clone(),
            company: contact.company.clone().unwrap_or_default(),
            role: contact.role.clone().unwrap_or_default(),
            sender: profile.map(|p| p.name.clone()).unwrap_or_default(),
            signature: profile.map(|p| p.signature_or_default()).unwrap_or_default(),
            date: chrono::Utc::now().format("%B %-d, %Y").to_string(),
        }
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        match key {
            "name" => Some(&self.name),
            "email" => Some(&self.email),
            "company" => Some(&self.company),
            "role" => Some(&self.role),
            "sender" => Some(&self.sender),
            "signature" => Some(&self.signature),
            "date" => Some(&self.date),
            _ => None,
        }
    }
}

/// Replace every recognized `{{key}}` in `input` with its value.
///
/// Unrecognized placeholders are kept verbatim. Idempotent on inputs with
/// no matching placeholders.
pub fn substitute(input: &str, vars: &TemplateVars) -> String {
    let re = Regex::new(r"\{\{([a-zA-Z_][a-zA-Z0-9_]*)\}\}").unwrap();

    re.replace_all(input, |caps: &Captures| match vars.lookup(&caps[1]) {
        Some(value) => value.to_string(),
        None => caps[0].to_string(),
    })
    .into_owned()
}
