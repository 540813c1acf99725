//! Checkout session initiation.
//!
//! Creates a payment session with the external processor and seeds the
//! initial pending generation record. The record write is best-effort:
//! the customer's checkout must succeed even if status tracking fails
//! to initialize, so a failed write is logged and the session is
//! returned anyway.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use veogen_core::checkout::{validate_checkout, CheckoutRequest};
use veogen_core::generation::GenerationRecord;
use veogen_core::ids;
use veogen_payments::CreateSessionParams;
use veogen_store::{GenerationStore, StoreError};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response body of a successful checkout creation.
#[derive(Debug, Serialize)]
pub struct CheckoutCreated {
    /// Hosted payment page to redirect the customer to.
    pub url: String,
    pub session_id: String,
    pub generation_id: String,
}

/// Outcome of the best-effort initial record write.
///
/// Distinguishes "critical path succeeded, side store failed" from
/// success instead of silently discarding the failure.
enum SeedOutcome {
    Persisted,
    Failed(StoreError),
}

/// POST /api/v1/checkout
///
/// Validate the request, create a payment session with the generation
/// metadata embedded, seed the pending record, and return the payment
/// URL plus the correlation IDs.
pub async fn create_checkout(
    State(state): State<AppState>,
    Json(input): Json<CheckoutRequest>,
) -> AppResult<impl IntoResponse> {
    validate_checkout(&input, state.config.payment_mode)?;

    let generation_id = ids::new_generation_id();

    let session = state
        .payments
        .create_checkout_session(&CreateSessionParams {
            price_id: input.price_id.clone(),
            success_url: input.success_url.clone(),
            cancel_url: input.cancel_url.clone(),
            customer_email: input.customer_email.clone(),
            generation_id: generation_id.clone(),
            prompt: input.prompt.trim().to_string(),
            video_count: input.video_count,
        })
        .await?;

    match seed_record(&*state.generations, &generation_id, &session.id, &input).await {
        SeedOutcome::Persisted => {
            tracing::info!(
                generation_id = %generation_id,
                session_id = %session.id,
                video_count = input.video_count,
                "Checkout session created",
            );
        }
        SeedOutcome::Failed(e) => {
            // Tracking degrades to webhook-cache-only for this job.
            tracing::warn!(
                generation_id = %generation_id,
                session_id = %session.id,
                error = %e,
                "Checkout succeeded but initial record write failed",
            );
        }
    }

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CheckoutCreated {
                url: session.url,
                session_id: session.id,
                generation_id,
            },
        }),
    ))
}

/// Write the initial pending record for a freshly created session.
async fn seed_record(
    store: &dyn GenerationStore,
    generation_id: &str,
    session_id: &str,
    input: &CheckoutRequest,
) -> SeedOutcome {
    let record = match GenerationRecord::new(
        generation_id.to_string(),
        session_id.to_string(),
        input.prompt.trim().to_string(),
        input.video_count,
    ) {
        Ok(record) => record,
        // Unreachable after validate_checkout; treated as a seed
        // failure rather than a checkout failure all the same.
        Err(e) => return SeedOutcome::Failed(StoreError::InvalidKey(e.to_string())),
    };

    match store.put(&record).await {
        Ok(()) => SeedOutcome::Persisted,
        Err(e) => SeedOutcome::Failed(e),
    }
}
