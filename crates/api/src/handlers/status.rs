//! Status resolution for polling clients.
//!
//! One endpoint accepts all three ID families and returns the
//! best-known status. Resolution order for session IDs: webhook cache
//! first (freshest if a webhook already fired), then the durable
//! record store, then the bare pending default. Generation and file
//! IDs go straight to the durable store. Reads never mutate.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use veogen_core::ids::{parse_status_id, StatusId};
use veogen_core::status::StatusReport;
use veogen_core::CoreError;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/status/{id}
///
/// `id` may be a payment session ID (`cs_...`), a generation ID
/// (`veo3_...`), or a video file UUID. Malformed IDs are rejected as
/// not-found before any storage access.
pub async fn resolve_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let report = match parse_status_id(&id)? {
        StatusId::Session(session_id) => resolve_session(&state, &session_id).await?,
        StatusId::Generation(generation_id) => {
            let record = state
                .generations
                .get(&generation_id)
                .await?
                .ok_or(CoreError::NotFound {
                    entity: "Generation",
                    id: generation_id,
                })?;
            StatusReport::from_record(&record)
        }
        StatusId::File(file_id) => {
            let record =
                state
                    .generations
                    .find_by_file(&file_id)
                    .await?
                    .ok_or(CoreError::NotFound {
                        entity: "File",
                        id: file_id.clone(),
                    })?;
            // find_by_file only returns records containing the slot.
            let video = record
                .video_by_file_id(&file_id)
                .cloned()
                .ok_or(CoreError::NotFound {
                    entity: "File",
                    id: file_id,
                })?;
            StatusReport::from_record_video(&record, &video)
        }
    };

    Ok(Json(DataResponse { data: report }))
}

/// Session-ID resolution: cache, then durable record, then default.
async fn resolve_session(state: &AppState, session_id: &str) -> AppResult<StatusReport> {
    if let Some(entry) = state.status_cache.lookup(session_id).await {
        return Ok(StatusReport::from_webhook(session_id, &entry));
    }

    if let Some(record) = state.generations.find_by_session(session_id).await? {
        return Ok(StatusReport::from_record(&record));
    }

    Ok(StatusReport::default_pending(session_id))
}
