//! Template Store

use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Template, TemplateUpdate};

/// Template store error
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(Uuid),
    #[error("Invalid template: {0}")]
    Invalid(String),
}

/// In-memory template repository
pub struct TemplateStore {
    templates: Arc<RwLock<Vec<Template>>>,
}

impl TemplateStore {
    pub fn new() -> Self {
        Self {
            templates: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Create and store a template
    pub async fn create(&self, name: &str, subject: &str, body: &str) -> Result<Template, TemplateError> {
        if name.trim().is_empty() {
            return Err(TemplateError::Invalid("name is required".to_string()));
        }
        if subject.trim().is_empty() && body.trim().is_empty() {
            return Err(TemplateError::Invalid("subject or body is required".to_string()));
        }

        let template = Template::new(name, subject, body);

        let mut templates = self.templates.write().await;
        templates.push(template.clone());
        Ok(template)
    }

    /// Register an already-built template
    pub async fn register(&self, template: Template) -> Template {
        let mut templates = self.templates.write().await;
        templates.push(template.clone());
        template
    }

    /// Update a template, refreshing `updated_at` and re-deriving `has_images`
    pub async fn update(&self, id: Uuid, update: TemplateUpdate) -> Result<Template, TemplateError> {
        let mut templates = self.templates.write().await;
        let template = templates
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TemplateError::NotFound(id))?;

        if let Some(name) = update.name {
            template.name = name;
        }
        if let Some(subject) = update.subject {
            template.subject = subject;
        }
        if let Some(body) = update.body {
            template.body = body;
            template.has_images = !template.image_markers().is_empty();
        }
        if let Some(has_logo) = update.has_logo {
            template.has_logo = has_logo;
        }
        template.updated_at = chrono::Utc::now();

        Ok(template.clone())
    }

    /// Delete a template
    pub async fn delete(&self, id: Uuid) -> Result<(), TemplateError> {
        let mut templates = self.templates.write().await;
        let before = templates.len();
        templates.retain(|t| t.id != id);

        if templates.len() == before {
            return Err(TemplateError::NotFound(id));
        }
        Ok(())
    }

    /// Get a template by ID
    pub async fn get(&self, id: Uuid) -> Option<Template> {
        let templates = self.templates.read().await;
        templates.iter().find(|t| t.id == id).cloned()
    }

    /// List all templates in insertion order
    pub async fn list(&self) -> Vec<Template> {
        let templates = self.templates.read().await;
        templates.clone()
    }

    /// Search by name or subject, case-insensitive
    pub async fn search(&self, query: &str) -> Vec<Template> {
        let query_lower = query.to_lowercase();
        let templates = self.templates.read().await;

        templates
            .iter()
            .filter(|t| {
                t.name.to_lowercase().contains(&query_lower)
                    || t.subject.to_lowercase().contains(&query_lower)
            })
            .cloned()
            .collect()
    }

    /// Number of stored templates
    pub async fn len(&self) -> usize {
        let templates = self.templates.read().await;
        templates.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::new()
    }
}
