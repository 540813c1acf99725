pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// POST /checkout                        create a checkout session
/// GET  /status/{id}                     resolve status (session / generation / file ID)
/// GET  /webhook-status/{session_id}     read the webhook cache entry
/// POST /webhook-status/{session_id}     write the webhook cache entry
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/checkout", post(handlers::checkout::create_checkout))
        .route("/status/{id}", get(handlers::status::resolve_status))
        .route(
            "/webhook-status/{session_id}",
            get(handlers::webhook_status::get_status).post(handlers::webhook_status::set_status),
        )
}
