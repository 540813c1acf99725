//! Fixed-interval status polling until a terminal state.
//!
//! Mirrors what the browser does while a customer waits: one request
//! immediately, then one per interval tick, stopping at `completed` or
//! `error`. There is no backoff and no per-request retry; a failed
//! request is reported to the observer and the next tick proceeds as
//! scheduled. Cancellation means "stop issuing new requests" — an
//! in-flight request is allowed to finish and its result is discarded.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use veogen_core::status::StatusReport;

use crate::{ApiClient, ClientError};

/// How one polling run ended.
#[derive(Debug)]
pub enum PollOutcome {
    /// The status reached `completed` or `error`.
    Terminal(StatusReport),
    /// The caller cancelled before a terminal status arrived.
    Cancelled,
}

/// One observable step of a polling run.
#[derive(Debug)]
pub enum PollEvent {
    /// A non-terminal report arrived.
    Update(StatusReport),
    /// A request failed; polling continues on the next tick.
    Failed(ClientError),
}

/// Poll `id` until its status is terminal or `cancel` fires.
///
/// Every non-terminal observation (including request failures) is
/// passed to `on_event` so a caller can surface intermediate state.
pub async fn poll_until_terminal(
    client: &ApiClient,
    id: &str,
    interval: Duration,
    cancel: CancellationToken,
    mut on_event: impl FnMut(PollEvent),
) -> PollOutcome {
    // The first tick completes immediately, giving the initial
    // request-on-mount behaviour.
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!(id, "Polling cancelled");
                return PollOutcome::Cancelled;
            }
            _ = ticker.tick() => {
                match client.status(id).await {
                    Ok(report) if report.status.is_terminal() => {
                        return PollOutcome::Terminal(report);
                    }
                    Ok(report) => on_event(PollEvent::Update(report)),
                    Err(e) => {
                        tracing::warn!(id, error = %e, "Status poll failed");
                        on_event(PollEvent::Failed(e));
                    }
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::extract::State;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    use super::*;

    /// Serve a scripted sequence of status bodies, one per request.
    async fn spawn_scripted_server(bodies: Vec<serde_json::Value>) -> (String, Arc<AtomicUsize>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let state = (Arc::new(bodies), Arc::clone(&hits));

        let app = Router::new().route(
            "/api/v1/status/{id}",
            get(
                |State((bodies, hits)): State<(Arc<Vec<serde_json::Value>>, Arc<AtomicUsize>)>| async move {
                    let n = hits.fetch_add(1, Ordering::SeqCst);
                    let body = bodies[n.min(bodies.len() - 1)].clone();
                    Json(json!({ "data": body }))
                },
            ),
        )
        .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}"), hits)
    }

    fn report(status: &str) -> serde_json::Value {
        json!({ "status": status, "source": "record", "progress": 0 })
    }

    #[tokio::test]
    async fn polls_until_completed() {
        let (base, hits) = spawn_scripted_server(vec![
            report("pending"),
            report("processing"),
            report("completed"),
        ])
        .await;
        let client = ApiClient::new(base);

        let mut updates = 0;
        let outcome = poll_until_terminal(
            &client,
            "veo3_test_poll0001",
            Duration::from_millis(10),
            CancellationToken::new(),
            |event| {
                if matches!(event, PollEvent::Update(_)) {
                    updates += 1;
                }
            },
        )
        .await;

        match outcome {
            PollOutcome::Terminal(report) => {
                assert!(report.status.is_terminal());
            }
            other => panic!("expected terminal outcome, got {other:?}"),
        }
        assert_eq!(updates, 2);
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn stops_at_error_status() {
        let (base, _hits) = spawn_scripted_server(vec![report("error")]).await;
        let client = ApiClient::new(base);

        let outcome = poll_until_terminal(
            &client,
            "veo3_test_poll0002",
            Duration::from_millis(10),
            CancellationToken::new(),
            |_| {},
        )
        .await;

        assert!(matches!(outcome, PollOutcome::Terminal(_)));
    }

    #[tokio::test]
    async fn cancellation_stops_new_requests() {
        let (base, hits) = spawn_scripted_server(vec![report("pending")]).await;
        let client = ApiClient::new(base);

        let cancel = CancellationToken::new();
        let canceller = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(30)).await;
            canceller.cancel();
        });

        let outcome = poll_until_terminal(
            &client,
            "veo3_test_poll0003",
            Duration::from_millis(20),
            cancel,
            |_| {},
        )
        .await;

        assert!(matches!(outcome, PollOutcome::Cancelled));
        // A couple of ticks at most before the cancel landed.
        assert!(hits.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test]
    async fn request_failure_is_reported_and_polling_continues() {
        // No server at this address: every request fails.
        let client = ApiClient::new("http://127.0.0.1:1");

        let cancel = CancellationToken::new();
        let canceller = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            canceller.cancel();
        });

        let mut failures = 0;
        let outcome = poll_until_terminal(
            &client,
            "veo3_test_poll0004",
            Duration::from_millis(10),
            cancel,
            |event| {
                if matches!(event, PollEvent::Failed(_)) {
                    failures += 1;
                }
            },
        )
        .await;

        assert!(matches!(outcome, PollOutcome::Cancelled));
        assert!(failures >= 1, "expected at least one reported failure");
    }
}
