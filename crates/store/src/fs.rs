//! Filesystem adapter: one JSON file per generation.
//!
//! Each record lives at `{dir}/{generation_id}.json`, serialized in
//! full and rewritten wholesale on every `put`. Writes are unguarded;
//! a race between the initial checkout write and a fast external
//! completion write resolves by whichever `write` lands last.
//!
//! Generation IDs are charset-validated before being used as a
//! filename component, so a malformed ID never reaches a path join.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use veogen_core::generation::GenerationRecord;
use veogen_core::ids;

use crate::error::StoreError;
use crate::generation_store::GenerationStore;

/// JSON-file-per-generation store rooted at a configured directory.
pub struct FsGenerationStore {
    dir: PathBuf,
}

impl FsGenerationStore {
    /// Open (and create if missing) a store rooted at `dir`.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    /// Root directory of the store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the record file for a pre-validated generation ID.
    fn record_path(&self, generation_id: &str) -> Result<PathBuf, StoreError> {
        if !ids::is_generation_id(generation_id) {
            return Err(StoreError::InvalidKey(generation_id.to_string()));
        }
        Ok(self.dir.join(format!("{generation_id}.json")))
    }

    /// Read and parse one record file; `Ok(None)` if it does not exist.
    async fn read_record(&self, path: &Path) -> Result<Option<GenerationRecord>, StoreError> {
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Scan every record in the directory, returning the first one
    /// matching `pred`. Unparseable files are skipped with a warning
    /// rather than failing the whole scan.
    async fn scan<F>(&self, pred: F) -> Result<Option<GenerationRecord>, StoreError>
    where
        F: Fn(&GenerationRecord) -> bool,
    {
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match self.read_record(&path).await {
                Ok(Some(record)) if pred(&record) => return Ok(Some(record)),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable record file");
                }
            }
        }
        Ok(None)
    }
}

#[async_trait]
impl GenerationStore for FsGenerationStore {
    async fn put(&self, record: &GenerationRecord) -> Result<(), StoreError> {
        let path = self.record_path(&record.generation_id)?;
        let json = serde_json::to_vec_pretty(record)?;
        tokio::fs::write(&path, json).await?;
        Ok(())
    }

    async fn get(&self, generation_id: &str) -> Result<Option<GenerationRecord>, StoreError> {
        let path = match self.record_path(generation_id) {
            Ok(path) => path,
            // A malformed key cannot name a record.
            Err(StoreError::InvalidKey(_)) => return Ok(None),
            Err(e) => return Err(e),
        };
        self.read_record(&path).await
    }

    async fn find_by_session(
        &self,
        session_id: &str,
    ) -> Result<Option<GenerationRecord>, StoreError> {
        self.scan(|record| record.session_id == session_id).await
    }

    async fn find_by_file(&self, file_id: &str) -> Result<Option<GenerationRecord>, StoreError> {
        self.scan(|record| record.video_by_file_id(file_id).is_some())
            .await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
