//! Consumer-side client for the generation service's HTTP API.
//!
//! [`ApiClient`] wraps the service endpoints; [`poller`] drives the
//! repeated status requests a UI would issue while waiting for a
//! generation to finish.

pub mod poller;

use serde::Deserialize;
use veogen_core::checkout::CheckoutRequest;
use veogen_core::status::StatusReport;
use veogen_core::webhook::WebhookStatusEntry;

/// Errors from the API client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// The service's error message, or the raw body.
        message: String,
    },
}

/// `{ "data": ... }` envelope used by every service response.
#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

/// Error body shape: `{ "error": ..., "code": ... }`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: String,
}

/// Response of a successful checkout creation.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutCreated {
    /// Hosted payment page to redirect the customer to.
    pub url: String,
    pub session_id: String,
    pub generation_id: String,
}

/// HTTP client for one service instance.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the service at `base_url`
    /// (e.g. `http://localhost:3000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Base URL this client targets.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /api/v1/checkout` — start a paid generation.
    pub async fn create_checkout(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutCreated, ClientError> {
        let response = self
            .client
            .post(format!("{}/api/v1/checkout", self.base_url))
            .json(request)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `GET /api/v1/status/{id}` — resolve the best-known status for a
    /// session, generation, or file ID.
    pub async fn status(&self, id: &str) -> Result<StatusReport, ClientError> {
        let response = self
            .client
            .get(format!("{}/api/v1/status/{id}", self.base_url))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `GET /api/v1/webhook-status/{session_id}` — the raw webhook
    /// cache entry for a session.
    pub async fn webhook_status(
        &self,
        session_id: &str,
    ) -> Result<WebhookStatusEntry, ClientError> {
        let response = self
            .client
            .get(format!(
                "{}/api/v1/webhook-status/{session_id}",
                self.base_url
            ))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Unwrap the `{ "data": ... }` envelope, or surface the service's
    /// error message on a non-2xx status.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json::<DataEnvelope<T>>().await?.data)
        } else {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}
