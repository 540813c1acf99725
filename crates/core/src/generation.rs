//! Generation records: the durable view of one paid video-generation job.
//!
//! A record is created synchronously during checkout with placeholder
//! video slots and is mutated only by the external completion process.
//! Everything that reads a record (the status endpoint, the poller)
//! treats it as read-only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Minimum number of videos per generation.
pub const MIN_VIDEO_COUNT: u8 = 1;
/// Maximum number of videos per generation.
pub const MAX_VIDEO_COUNT: u8 = 3;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle status of a generation (or of a single video within one).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStatus {
    Pending,
    Processing,
    Completed,
    Error,
}

impl GenerationStatus {
    /// Whether this status ends the job. Pollers stop at terminal states.
    pub fn is_terminal(self) -> bool {
        matches!(self, GenerationStatus::Completed | GenerationStatus::Error)
    }

    /// Lowercase wire name, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            GenerationStatus::Pending => "pending",
            GenerationStatus::Processing => "processing",
            GenerationStatus::Completed => "completed",
            GenerationStatus::Error => "error",
        }
    }
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// One output slot inside a generation.
///
/// `file_id` starts as a placeholder UUID and is overwritten with the
/// provider-issued file ID once the video exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSlot {
    pub file_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    pub status: GenerationStatus,
}

impl VideoSlot {
    /// A pending slot with a fresh placeholder file ID.
    pub fn placeholder() -> Self {
        Self {
            file_id: uuid::Uuid::new_v4().to_string(),
            url: None,
            thumbnail_url: None,
            status: GenerationStatus::Pending,
        }
    }
}

/// Durable record of one generation job and its constituent videos.
///
/// Invariant: `videos.len() == video_count` for the lifetime of the
/// record. [`GenerationRecord::new`] establishes it; nothing in this
/// repository resizes the list afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub generation_id: String,
    /// Payment session ID this job was paid through. Correlation key
    /// between the ephemeral webhook cache and this record.
    pub session_id: String,
    pub prompt: String,
    pub video_count: u8,
    pub status: GenerationStatus,
    /// Completion percentage. Monotonically non-decreasing in
    /// practice, but not enforced here.
    pub progress: u8,
    pub created_at: DateTime<Utc>,
    pub videos: Vec<VideoSlot>,
}

impl GenerationRecord {
    /// Create the initial pending record seeded at checkout time.
    ///
    /// Rejects a `video_count` outside [`MIN_VIDEO_COUNT`]..=[`MAX_VIDEO_COUNT`].
    pub fn new(
        generation_id: String,
        session_id: String,
        prompt: String,
        video_count: u8,
    ) -> Result<Self, CoreError> {
        if !(MIN_VIDEO_COUNT..=MAX_VIDEO_COUNT).contains(&video_count) {
            return Err(CoreError::Validation(format!(
                "video_count must be between {MIN_VIDEO_COUNT} and {MAX_VIDEO_COUNT}, got {video_count}"
            )));
        }

        Ok(Self {
            generation_id,
            session_id,
            prompt,
            video_count,
            status: GenerationStatus::Pending,
            progress: 0,
            created_at: Utc::now(),
            videos: (0..video_count).map(|_| VideoSlot::placeholder()).collect(),
        })
    }

    /// The slot carrying `file_id`, if any.
    pub fn video_by_file_id(&self, file_id: &str) -> Option<&VideoSlot> {
        self.videos.iter().find(|v| v.file_id == file_id)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- Record creation --

    #[test]
    fn new_record_has_one_slot_per_video() {
        for count in MIN_VIDEO_COUNT..=MAX_VIDEO_COUNT {
            let record = GenerationRecord::new(
                "veo3_abc_def".into(),
                "cs_test_123".into(),
                "a cat on a skateboard".into(),
                count,
            )
            .unwrap();

            assert_eq!(record.videos.len(), count as usize);
            assert!(record
                .videos
                .iter()
                .all(|v| v.status == GenerationStatus::Pending));
        }
    }

    #[test]
    fn new_record_starts_pending_at_zero_progress() {
        let record =
            GenerationRecord::new("veo3_a_b".into(), "cs_test_1".into(), "p".into(), 2).unwrap();
        assert_eq!(record.status, GenerationStatus::Pending);
        assert_eq!(record.progress, 0);
    }

    #[test]
    fn new_record_rejects_zero_videos() {
        let err = GenerationRecord::new("veo3_a_b".into(), "cs_test_1".into(), "p".into(), 0);
        assert!(err.is_err());
    }

    #[test]
    fn new_record_rejects_four_videos() {
        let err = GenerationRecord::new("veo3_a_b".into(), "cs_test_1".into(), "p".into(), 4);
        assert!(err.is_err());
    }

    #[test]
    fn placeholder_slots_have_distinct_file_ids() {
        let record =
            GenerationRecord::new("veo3_a_b".into(), "cs_test_1".into(), "p".into(), 3).unwrap();
        let ids: std::collections::HashSet<_> =
            record.videos.iter().map(|v| v.file_id.as_str()).collect();
        assert_eq!(ids.len(), 3);
    }

    // -- Lookup --

    #[test]
    fn video_by_file_id_finds_matching_slot() {
        let record =
            GenerationRecord::new("veo3_a_b".into(), "cs_test_1".into(), "p".into(), 2).unwrap();
        let wanted = record.videos[1].file_id.clone();
        assert_eq!(record.video_by_file_id(&wanted).unwrap().file_id, wanted);
    }

    #[test]
    fn video_by_file_id_misses_unknown_id() {
        let record =
            GenerationRecord::new("veo3_a_b".into(), "cs_test_1".into(), "p".into(), 1).unwrap();
        assert!(record.video_by_file_id("not-a-slot").is_none());
    }

    // -- Status --

    #[test]
    fn terminal_statuses() {
        assert!(GenerationStatus::Completed.is_terminal());
        assert!(GenerationStatus::Error.is_terminal());
        assert!(!GenerationStatus::Pending.is_terminal());
        assert!(!GenerationStatus::Processing.is_terminal());
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&GenerationStatus::Processing).unwrap();
        assert_eq!(json, "\"processing\"");
    }

    #[test]
    fn record_round_trips_through_json() {
        let record = GenerationRecord::new(
            "veo3_abc_def".into(),
            "cs_test_123".into(),
            "a cat on a skateboard".into(),
            2,
        )
        .unwrap();
        let json = serde_json::to_string(&record).unwrap();
        let back: GenerationRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
