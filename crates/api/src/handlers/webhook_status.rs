//! Webhook status cache surface.
//!
//! The external webhook (payment processor or generation provider)
//! POSTs the latest status for a session here; the frontend success
//! page GETs it while waiting. Both sides reject session IDs lacking
//! the expected prefix before touching the cache.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use veogen_core::generation::GenerationStatus;
use veogen_core::ids::validate_session_id;
use veogen_core::webhook::WebhookStatusEntry;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Incoming status payload from the external webhook handler.
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: GenerationStatus,
    #[serde(default)]
    pub file_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub tool_slug: Option<String>,
    #[serde(default)]
    pub tool_title: Option<String>,
}

/// Acknowledgement body for a status write.
#[derive(Debug, Serialize)]
pub struct StatusAck {
    pub received: bool,
}

/// GET /api/v1/webhook-status/{session_id}
///
/// The stored entry, or the default pending entry if no webhook has
/// reported yet. 400 if the session ID lacks the expected prefix.
pub async fn get_status(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    validate_session_id(&session_id)?;

    let entry = state.status_cache.get(&session_id).await;
    Ok(Json(DataResponse { data: entry }))
}

/// POST /api/v1/webhook-status/{session_id}
///
/// Overwrite (not merge) the stored entry for the session and stamp
/// the current time. Idempotent for identical payloads.
pub async fn set_status(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(update): Json<StatusUpdate>,
) -> AppResult<impl IntoResponse> {
    validate_session_id(&session_id)?;

    let entry = WebhookStatusEntry {
        status: update.status,
        file_id: update.file_id,
        error: update.error,
        timestamp: None, // stamped by the cache
        tool_slug: update.tool_slug,
        tool_title: update.tool_title,
    };

    state.status_cache.set(&session_id, entry).await;

    tracing::info!(
        session_id = %session_id,
        status = update.status.as_str(),
        "Webhook status recorded",
    );

    Ok(Json(DataResponse {
        data: StatusAck { received: true },
    }))
}
