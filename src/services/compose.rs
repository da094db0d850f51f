//! Email Composer
//!
//! Assembles the final HTML payload from a rendered body: logo before the
//! body, signature block after it, banner last. The order is fixed no
//! matter in which order the parts were configured.

use serde::{Deserialize, Serialize};

/// Optional branding assets injected into composed emails
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Branding {
    /// Logo image URL, prepended to the body
    pub logo_url: Option<String>,
    /// Banner image URL, appended after the body
    pub banner_url: Option<String>,
}

impl Branding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_logo(mut self, url: &str) -> Self {
        self.logo_url = Some(url.to_string());
        self
    }

    pub fn with_banner(mut self, url: &str) -> Self {
        self.banner_url = Some(url.to_string());
        self
    }
}

/// Composes final email bodies from rendered HTML
#[derive(Debug, Clone, Default)]
pub struct EmailComposer {
    branding: Branding,
    signature: Option<String>,
}

impl EmailComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_branding(mut self, branding: Branding) -> Self {
        self.branding = branding;
        self
    }

    pub fn with_signature(mut self, signature: &str) -> Self {
        self.signature = Some(signature.to_string());
        self
    }

    /// Produce the final body: logo, body, signature block, banner.
    ///
    /// The signature is applied once here, not per send variant.
    pub fn compose(&self, body: &str) -> String {
        let mut html = String::new();

        if let Some(logo) = &self.branding.logo_url {
            html.push_str(&format!(r#"<img src="{}" alt="Logo" /><br />"#, logo));
        }

        html.push_str(body);

        if let Some(signature) = &self.signature {
            html.push_str(&format!("<br><br>--<br>{}", signature));
        }

        if let Some(banner) = &self.branding.banner_url {
            html.push_str(&format!(r#"<br /><img src="{}" alt="Banner" />"#, banner));
        }

        html
    }
}
