//! Checkout request validation and price whitelists.
//!
//! Price IDs are environment-dependent: the processor issues separate
//! identifiers for test mode and live mode, and a checkout must only
//! reference prices valid for the mode the server is running in.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::generation::{MAX_VIDEO_COUNT, MIN_VIDEO_COUNT};

/// Upper bound on prompt length, matching the generation provider's limit.
pub const MAX_PROMPT_CHARS: usize = 2000;

/// Valid price IDs when running against the processor's test mode.
pub const TEST_PRICE_IDS: &[&str] = &[
    "price_test_veo3_single",
    "price_test_veo3_duo",
    "price_test_veo3_trio",
];

/// Valid price IDs when running against the processor's live mode.
pub const LIVE_PRICE_IDS: &[&str] = &[
    "price_1QVeo3Single0001",
    "price_1QVeo3Duo0002",
    "price_1QVeo3Trio0003",
];

/// Which payment-processor environment the server targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMode {
    Test,
    Live,
}

impl PaymentMode {
    /// The price whitelist for this mode.
    pub fn price_ids(self) -> &'static [&'static str] {
        match self {
            PaymentMode::Test => TEST_PRICE_IDS,
            PaymentMode::Live => LIVE_PRICE_IDS,
        }
    }
}

/// Parsed checkout request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub price_id: String,
    pub prompt: String,
    pub video_count: u8,
    pub success_url: String,
    pub cancel_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
}

/// Validate a checkout request against the mode's price whitelist and
/// the field constraints. All checks run before any side effect.
pub fn validate_checkout(request: &CheckoutRequest, mode: PaymentMode) -> Result<(), CoreError> {
    if !mode.price_ids().contains(&request.price_id.as_str()) {
        return Err(CoreError::Validation(format!(
            "Unknown price_id '{}'",
            request.price_id
        )));
    }

    let prompt = request.prompt.trim();
    if prompt.is_empty() {
        return Err(CoreError::Validation("prompt must not be empty".to_string()));
    }
    if prompt.chars().count() > MAX_PROMPT_CHARS {
        return Err(CoreError::Validation(format!(
            "prompt must be at most {MAX_PROMPT_CHARS} characters"
        )));
    }

    if !(MIN_VIDEO_COUNT..=MAX_VIDEO_COUNT).contains(&request.video_count) {
        return Err(CoreError::Validation(format!(
            "video_count must be between {MIN_VIDEO_COUNT} and {MAX_VIDEO_COUNT}, got {}",
            request.video_count
        )));
    }

    if request.success_url.trim().is_empty() {
        return Err(CoreError::Validation(
            "success_url must not be empty".to_string(),
        ));
    }
    if request.cancel_url.trim().is_empty() {
        return Err(CoreError::Validation(
            "cancel_url must not be empty".to_string(),
        ));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
