//! SMTP Settings and Sender Profile Models

use serde::{Deserialize, Serialize};

/// SMTP relay configuration.
///
/// `is_configured` tracks whether the user has ever saved settings; it is
/// independent of field completeness. The live/mock gate is
/// [`SmtpSettings::is_complete`], never this flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpSettings {
    /// SMTP host
    pub host: String,
    /// SMTP port
    pub port: u16,
    /// Username
    pub username: String,
    /// Password
    pub password: String,
    /// Sender display name
    pub from_name: String,
    /// Sender address
    pub from_email: String,
    /// Use STARTTLS
    pub use_tls: bool,
    /// Record sends in history
    pub save_to_history: bool,
    /// Whether settings have ever been saved
    pub is_configured: bool,
}

impl Default for SmtpSettings {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 587,
            username: String::new(),
            password: String::new(),
            from_name: String::new(),
            from_email: String::new(),
            use_tls: true,
            save_to_history: true,
            is_configured: false,
        }
    }
}

impl SmtpSettings {
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            host: host.to_string(),
            port,
            ..Default::default()
        }
    }

    pub fn with_credentials(mut self, username: &str, password: &str) -> Self {
        self.username = username.to_string();
        self.password = password.to_string();
        self
    }

    pub fn with_sender(mut self, from_name: &str, from_email: &str) -> Self {
        self.from_name = from_name.to_string();
        self.from_email = from_email.to_string();
        self
    }

    pub fn with_tls(mut self, use_tls: bool) -> Self {
        self.use_tls = use_tls;
        self
    }

    /// True when every field required for a live send is present.
    ///
    /// Port range (1-65535) is enforced at save time, not here.
    pub fn is_complete(&self) -> bool {
        !self.host.is_empty()
            && self.port != 0
            && !self.username.is_empty()
            && !self.password.is_empty()
            && !self.from_email.is_empty()
            && !self.from_name.is_empty()
    }

    /// Formatted sender address, e.g. `Jane Smith <jane@example.com>`
    pub fn from_address(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }
}

/// The sending user's identity, used for the `sender` and `signature`
/// template variables and the signature block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SenderProfile {
    /// User's name
    pub name: String,
    /// User's email
    pub email: String,
    /// HTML signature appended to composed emails
    pub signature: Option<String>,
}

impl SenderProfile {
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            signature: None,
        }
    }

    pub fn with_signature(mut self, signature: &str) -> Self {
        self.signature = Some(signature.to_string());
        self
    }

    /// The configured signature, or a name/email fallback
    pub fn signature_or_default(&self) -> String {
        match &self.signature {
            Some(sig) => sig.clone(),
            None => format!("{}<br>{}", self.name, self.email),
        }
    }
}
