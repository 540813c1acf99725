//! Ephemeral webhook status entries, keyed by payment session ID.
//!
//! An entry is the processor/provider webhook's latest word on a
//! session. It is never merged into a [`GenerationRecord`]; the two
//! stay separate, eventually-consistent views of the same job.
//!
//! [`GenerationRecord`]: crate::generation::GenerationRecord

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::generation::GenerationStatus;

/// Latest known webhook-reported status for one payment session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookStatusEntry {
    pub status: GenerationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_title: Option<String>,
}

impl Default for WebhookStatusEntry {
    /// The answer for a session no webhook has reported on yet.
    fn default() -> Self {
        Self {
            status: GenerationStatus::Pending,
            file_id: None,
            error: None,
            timestamp: None,
            tool_slug: None,
            tool_title: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_entry_is_bare_pending() {
        let entry = WebhookStatusEntry::default();
        assert_eq!(entry.status, GenerationStatus::Pending);
        assert!(entry.file_id.is_none());
        assert!(entry.error.is_none());
        assert!(entry.timestamp.is_none());
    }

    #[test]
    fn optional_fields_are_omitted_from_json() {
        let json = serde_json::to_value(WebhookStatusEntry::default()).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "pending" }));
    }
}
