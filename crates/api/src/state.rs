use std::sync::Arc;

use veogen_payments::PaymentsClient;
use veogen_store::{GenerationStore, StatusCache};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Durable generation record store (fs or memory adapter).
    pub generations: Arc<dyn GenerationStore>,
    /// Ephemeral per-session webhook status cache. Lifetime == process.
    pub status_cache: Arc<StatusCache>,
    /// Payment processor client.
    pub payments: Arc<PaymentsClient>,
}
