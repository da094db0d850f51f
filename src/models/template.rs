//! Email Template Models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A reusable subject/body pair with `{{variable}}` placeholders.
///
/// Bodies are HTML-ish and may contain `[IMAGE:id]` markers referencing
/// uploaded images; `has_images` tracks their presence. A send always
/// operates on a clone of the template, never a live reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    /// Unique identifier
    pub id: Uuid,
    /// Template name
    pub name: String,
    /// Subject line, may contain placeholders
    pub subject: String,
    /// HTML body with placeholders and optional image markers
    pub body: String,
    /// Whether the body contains `[IMAGE:id]` markers
    pub has_images: bool,
    /// Whether the configured logo should be injected when composing
    pub has_logo: bool,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Template {
    pub fn new(name: &str, subject: &str, body: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: name.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
            has_images: !image_markers(body).is_empty(),
            has_logo: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_logo(mut self, has_logo: bool) -> Self {
        self.has_logo = has_logo;
        self
    }

    /// Placeholder names used in subject and body, deduped, in order of
    /// first occurrence
    pub fn extract_variables(&self) -> Vec<String> {
        let mut vars = Vec::new();
        let re = regex::Regex::new(r"\{\{([a-zA-Z_][a-zA-Z0-9_]*)\}\}").unwrap();

        let content = format!("{} {}", self.subject, self.body);

        for cap in re.captures_iter(&content) {
            let var_name = cap[1].to_string();
            if !vars.contains(&var_name) {
                vars.push(var_name);
            }
        }

        vars
    }

    /// IDs referenced by `[IMAGE:id]` markers in the body
    pub fn image_markers(&self) -> Vec<String> {
        image_markers(&self.body)
    }
}

/// Fields accepted when updating a template; `None` leaves the field as is
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateUpdate {
    pub name: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub has_logo: Option<bool>,
}

fn image_markers(body: &str) -> Vec<String> {
    let re = regex::Regex::new(r"\[IMAGE:([A-Za-z0-9_-]+)\]").unwrap();
    re.captures_iter(body).map(|cap| cap[1].to_string()).collect()
}
