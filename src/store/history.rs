//! Send History Store

use std::sync::Arc;
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::EmailHistory;

/// History recording error
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Sink for send-attempt records.
///
/// Called exactly once per attempt by the bulk orchestrator and the
/// single-send flow. A recording failure must never fail the send that
/// triggered it; callers log and move on.
#[async_trait]
pub trait HistoryRecorder: Send + Sync {
    async fn record(&self, entry: EmailHistory) -> Result<(), HistoryError>;
}

/// In-memory, append-only history log.
///
/// Entries are only removable via [`HistoryStore::clear_all`].
pub struct HistoryStore {
    entries: Arc<RwLock<Vec<EmailHistory>>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Get an entry by ID
    pub async fn get(&self, id: Uuid) -> Option<EmailHistory> {
        let entries = self.entries.read().await;
        entries.iter().find(|e| e.id == id).cloned()
    }

    /// All entries in the order they were recorded
    pub async fn list(&self) -> Vec<EmailHistory> {
        let entries = self.entries.read().await;
        entries.clone()
    }

    /// Most recent entries, newest first
    pub async fn recent(&self, limit: usize) -> Vec<EmailHistory> {
        let entries = self.entries.read().await;
        entries.iter().rev().take(limit).cloned().collect()
    }

    /// Remove every entry, returning how many were dropped
    pub async fn clear_all(&self) -> usize {
        let mut entries = self.entries.write().await;
        let count = entries.len();
        entries.clear();
        count
    }

    /// Export all entries to pretty-printed JSON
    pub async fn export(&self) -> Result<String, HistoryError> {
        let entries = self.entries.read().await;
        serde_json::to_string_pretty(&*entries).map_err(|e| HistoryError::Storage(e.to_string()))
    }

    /// Number of recorded entries
    pub async fn len(&self) -> usize {
        let entries = self.entries.read().await;
        entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl HistoryRecorder for HistoryStore {
    async fn record(&self, entry: EmailHistory) -> Result<(), HistoryError> {
        let mut entries = self.entries.write().await;
        entries.push(entry);
        Ok(())
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}
