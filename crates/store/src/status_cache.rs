//! Process-local cache of webhook-reported statuses.
//!
//! One entry per payment session ID, overwritten (never merged) on
//! each write. No expiry and no eviction: the process is short-lived
//! per deployment, and loss on restart is tolerated because readers
//! fall back to the durable generation store.
//!
//! The cache is plain shared state injected through `AppState`; it is
//! deliberately not a module-level singleton.

use std::collections::HashMap;

use tokio::sync::RwLock;
use veogen_core::webhook::WebhookStatusEntry;

/// Shared map of session ID -> latest webhook status.
#[derive(Default)]
pub struct StatusCache {
    entries: RwLock<HashMap<String, WebhookStatusEntry>>,
}

impl StatusCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the entry for `session_id`, stamping the current time.
    pub async fn set(&self, session_id: &str, mut entry: WebhookStatusEntry) {
        entry.timestamp = Some(chrono::Utc::now());
        self.entries
            .write()
            .await
            .insert(session_id.to_string(), entry);
    }

    /// The stored entry, or the default pending entry if none exists.
    pub async fn get(&self, session_id: &str) -> WebhookStatusEntry {
        self.lookup(session_id).await.unwrap_or_default()
    }

    /// The stored entry, if a webhook has actually reported one.
    ///
    /// Distinguishes "no entry" from the default so the status
    /// resolution path can fall back to the durable store.
    pub async fn lookup(&self, session_id: &str) -> Option<WebhookStatusEntry> {
        self.entries.read().await.get(session_id).cloned()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
