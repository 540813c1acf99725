//! The status report served to polling clients.
//!
//! A report is the best-known answer for one ID, derived from exactly
//! one source: the webhook cache (freshest, if a webhook already
//! fired), the durable generation record, or the bare default when
//! neither exists yet. The `source` field makes the resolution path
//! observable to callers and tests.

use serde::{Deserialize, Serialize};

use crate::generation::{GenerationRecord, GenerationStatus, VideoSlot};
use crate::webhook::WebhookStatusEntry;

/// Which store a [`StatusReport`] was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusSource {
    /// The ephemeral webhook status cache.
    Webhook,
    /// The durable generation record store.
    Record,
    /// Neither store knows this ID yet.
    Default,
}

/// Best-known status for a session, generation, or file ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusReport {
    pub status: GenerationStatus,
    pub source: StatusSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub videos: Option<Vec<VideoSlot>>,
    /// The single matching slot, for file-ID lookups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoSlot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusReport {
    /// Report derived from a webhook cache entry.
    pub fn from_webhook(session_id: &str, entry: &WebhookStatusEntry) -> Self {
        Self {
            status: entry.status,
            source: StatusSource::Webhook,
            progress: None,
            generation_id: None,
            session_id: Some(session_id.to_string()),
            videos: None,
            video: None,
            error: entry.error.clone(),
        }
    }

    /// Report derived from a durable generation record.
    pub fn from_record(record: &GenerationRecord) -> Self {
        Self {
            status: record.status,
            source: StatusSource::Record,
            progress: Some(record.progress),
            generation_id: Some(record.generation_id.clone()),
            session_id: Some(record.session_id.clone()),
            videos: Some(record.videos.clone()),
            video: None,
            error: None,
        }
    }

    /// Report for one video slot inside a record (file-ID lookup).
    pub fn from_record_video(record: &GenerationRecord, video: &VideoSlot) -> Self {
        Self {
            status: video.status,
            source: StatusSource::Record,
            progress: Some(record.progress),
            generation_id: Some(record.generation_id.clone()),
            session_id: Some(record.session_id.clone()),
            videos: None,
            video: Some(video.clone()),
            error: None,
        }
    }

    /// The answer when neither store knows the session yet.
    pub fn default_pending(session_id: &str) -> Self {
        Self {
            status: GenerationStatus::Pending,
            source: StatusSource::Default,
            progress: None,
            generation_id: None,
            session_id: Some(session_id.to_string()),
            videos: None,
            video: None,
            error: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
