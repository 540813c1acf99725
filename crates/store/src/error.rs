/// Errors from the generation record stores.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem access failed (open, read, write, create-dir).
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored record could not be serialized or parsed.
    #[error("Record serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The caller passed an ID that is not safe to use as a store key.
    #[error("Invalid store key: {0}")]
    InvalidKey(String),
}
