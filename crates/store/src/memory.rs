//! In-memory adapter: same contract as the filesystem store, minus
//! durability. Used by tests and ephemeral deployments.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use veogen_core::generation::GenerationRecord;

use crate::error::StoreError;
use crate::generation_store::GenerationStore;

/// Map-backed [`GenerationStore`].
#[derive(Default)]
pub struct MemoryGenerationStore {
    records: RwLock<HashMap<String, GenerationRecord>>,
}

impl MemoryGenerationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GenerationStore for MemoryGenerationStore {
    async fn put(&self, record: &GenerationRecord) -> Result<(), StoreError> {
        self.records
            .write()
            .await
            .insert(record.generation_id.clone(), record.clone());
        Ok(())
    }

    async fn get(&self, generation_id: &str) -> Result<Option<GenerationRecord>, StoreError> {
        Ok(self.records.read().await.get(generation_id).cloned())
    }

    async fn find_by_session(
        &self,
        session_id: &str,
    ) -> Result<Option<GenerationRecord>, StoreError> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .find(|r| r.session_id == session_id)
            .cloned())
    }

    async fn find_by_file(&self, file_id: &str) -> Result<Option<GenerationRecord>, StoreError> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .find(|r| r.video_by_file_id(file_id).is_some())
            .cloned())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
