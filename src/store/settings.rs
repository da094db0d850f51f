//! Settings Store

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::{SenderProfile, SmtpSettings};

/// Settings store error
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Port must be between 1 and 65535")]
    InvalidPort,
    #[error("Invalid sender address: {0}")]
    InvalidSender(String),
}

/// Holds the SMTP configuration and the sending user's profile.
///
/// Callers always receive snapshots; an in-flight bulk run is unaffected by
/// concurrent saves.
pub struct SettingsStore {
    smtp: Arc<RwLock<SmtpSettings>>,
    profile: Arc<RwLock<Option<SenderProfile>>>,
}

impl SettingsStore {
    pub fn new() -> Self {
        Self {
            smtp: Arc::new(RwLock::new(SmtpSettings::default())),
            profile: Arc::new(RwLock::new(None)),
        }
    }

    /// Snapshot of the current SMTP settings
    pub async fn smtp(&self) -> SmtpSettings {
        let smtp = self.smtp.read().await;
        smtp.clone()
    }

    /// Save SMTP settings.
    ///
    /// The port range is validated here, at save time; field completeness is
    /// not — incomplete settings are saved and simply fail the live-send
    /// gate later. Saving marks the settings as configured.
    pub async fn save_smtp(&self, mut settings: SmtpSettings) -> Result<(), SettingsError> {
        if settings.port == 0 {
            return Err(SettingsError::InvalidPort);
        }

        settings.is_configured = true;

        let mut smtp = self.smtp.write().await;
        *smtp = settings;
        Ok(())
    }

    /// Reset SMTP settings to their defaults
    pub async fn reset_smtp(&self) {
        let mut smtp = self.smtp.write().await;
        *smtp = SmtpSettings::default();
    }

    /// Snapshot of the sender profile, if set
    pub async fn profile(&self) -> Option<SenderProfile> {
        let profile = self.profile.read().await;
        profile.clone()
    }

    /// Set the sender profile
    pub async fn set_profile(&self, profile: SenderProfile) {
        let mut current = self.profile.write().await;
        *current = Some(profile);
    }

    /// Clear the sender profile
    pub async fn clear_profile(&self) {
        let mut current = self.profile.write().await;
        *current = None;
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}
