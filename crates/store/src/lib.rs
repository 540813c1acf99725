//! Storage for the video-generation service.
//!
//! Two stores with deliberately different lifetimes:
//!
//! - [`GenerationStore`]: the durable record of each generation job,
//!   with a filesystem adapter (one JSON file per generation) and an
//!   in-memory adapter, selected by configuration.
//! - [`StatusCache`]: the ephemeral, process-local map of the latest
//!   webhook-reported status per payment session. Lost on restart;
//!   readers fall back to the durable store.

mod error;
mod fs;
mod generation_store;
mod memory;
mod status_cache;

pub use error::StoreError;
pub use fs::FsGenerationStore;
pub use generation_store::GenerationStore;
pub use memory::MemoryGenerationStore;
pub use status_cache::StatusCache;
