use async_trait::async_trait;
use veogen_core::generation::GenerationRecord;

use crate::error::StoreError;

/// Durable store of [`GenerationRecord`]s, keyed by generation ID.
///
/// `put` rewrites the whole record (no merge, no partial patch).
/// Reads never mutate. Lookups return `Ok(None)` for absent records;
/// `Err` is reserved for storage faults.
#[async_trait]
pub trait GenerationStore: Send + Sync {
    /// Write (or overwrite) the record under its generation ID.
    async fn put(&self, record: &GenerationRecord) -> Result<(), StoreError>;

    /// Fetch a record by generation ID.
    async fn get(&self, generation_id: &str) -> Result<Option<GenerationRecord>, StoreError>;

    /// Find the record correlated with a payment session ID.
    async fn find_by_session(
        &self,
        session_id: &str,
    ) -> Result<Option<GenerationRecord>, StoreError>;

    /// Find the record containing a video with the given file ID.
    async fn find_by_file(&self, file_id: &str) -> Result<Option<GenerationRecord>, StoreError>;
}
