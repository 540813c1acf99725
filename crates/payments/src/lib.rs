//! HTTP client for the external payment processor's checkout API.
//!
//! Wraps the processor's form-encoded `POST /v1/checkout/sessions`
//! endpoint using [`reqwest`]. Job parameters are embedded as metadata
//! on both the checkout session and its payment intent, so whichever
//! webhook the processor fires later carries the generation ID.

use serde::Deserialize;

/// Request timeout for a single processor call.
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(15);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Errors from the payment processor client.
#[derive(Debug, thiserror::Error)]
pub enum PaymentsError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The processor returned a non-2xx status code.
    #[error("Payment processor error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// The processor's error message, or the raw body if unparseable.
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Parameters for creating one checkout session.
#[derive(Debug, Clone)]
pub struct CreateSessionParams {
    pub price_id: String,
    pub success_url: String,
    pub cancel_url: String,
    pub customer_email: Option<String>,
    /// Generation ID minted by the checkout initiator.
    pub generation_id: String,
    pub prompt: String,
    pub video_count: u8,
}

/// A created checkout session: the ID to correlate webhooks against
/// and the hosted payment page URL to redirect the customer to.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: String,
}

/// Error envelope returned by the processor on failure.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Client for the payment processor's REST API.
pub struct PaymentsClient {
    client: reqwest::Client,
    api_base: String,
    secret_key: String,
}

impl PaymentsClient {
    /// Create a client for the given API base URL and secret key.
    ///
    /// * `api_base` - e.g. `https://api.stripe.com`.
    pub fn new(api_base: String, secret_key: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            api_base,
            secret_key,
        }
    }

    /// Base API URL this client targets.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Create a checkout session for one generation job.
    ///
    /// Sends `POST /v1/checkout/sessions` with the job parameters
    /// duplicated into `metadata` and `payment_intent_data[metadata]`.
    pub async fn create_checkout_session(
        &self,
        params: &CreateSessionParams,
    ) -> Result<CheckoutSession, PaymentsError> {
        let form = session_form(params);
        tracing::debug!(
            price_id = %params.price_id,
            generation_id = %params.generation_id,
            "Creating checkout session",
        );

        let response = self
            .client
            .post(format!("{}/v1/checkout/sessions", self.api_base))
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&form)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Parse a 2xx response body as `T`, or surface the processor's
    /// error message on a non-2xx status.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, PaymentsError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json::<T>().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);
            Err(PaymentsError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// Build the form-encoded field list for a session create call.
///
/// Kept separate from the HTTP call so the encoding is testable.
fn session_form(params: &CreateSessionParams) -> Vec<(String, String)> {
    let mut form = vec![
        ("mode".to_string(), "payment".to_string()),
        ("line_items[0][price]".to_string(), params.price_id.clone()),
        ("line_items[0][quantity]".to_string(), "1".to_string()),
        ("success_url".to_string(), params.success_url.clone()),
        ("cancel_url".to_string(), params.cancel_url.clone()),
    ];

    if let Some(email) = &params.customer_email {
        form.push(("customer_email".to_string(), email.clone()));
    }

    // Metadata on both the session and its payment intent: the
    // generation ID must survive whichever webhook arrives first.
    for scope in ["metadata", "payment_intent_data[metadata]"] {
        form.push((
            format!("{scope}[generation_id]"),
            params.generation_id.clone(),
        ));
        form.push((format!("{scope}[prompt]"), params.prompt.clone()));
        form.push((
            format!("{scope}[video_count]"),
            params.video_count.to_string(),
        ));
    }

    form
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
