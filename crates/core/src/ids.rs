//! ID formats, minting, and classification.
//!
//! Three ID families flow through the status surface:
//!
//! - payment session IDs issued by the processor (`cs_` prefix),
//! - generation IDs minted here at checkout time (`veo3_` prefix),
//! - file IDs for produced videos (hyphenated UUIDs).
//!
//! Generation IDs double as filename keys in the filesystem store, so
//! classification is a hard precondition before any storage access:
//! anything that fails [`parse_status_id`] never reaches a path join.

use rand::distr::Alphanumeric;
use rand::Rng;

use crate::error::CoreError;

/// Prefix of checkout session IDs issued by the payment processor.
pub const SESSION_ID_PREFIX: &str = "cs_";
/// Prefix of generation IDs minted by the checkout initiator.
pub const GENERATION_ID_PREFIX: &str = "veo3_";

/// Length of the random suffix appended to generation IDs.
const GENERATION_ID_SUFFIX_LEN: usize = 8;

// ---------------------------------------------------------------------------
// Minting
// ---------------------------------------------------------------------------

/// Mint a fresh generation ID: `veo3_<base36 unix millis>_<8 random alnums>`.
///
/// Time-based prefix plus random suffix. Not cryptographically
/// collision-proof; collision probability is negligible at this scale.
pub fn new_generation_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis().max(0) as u64;
    let suffix: String = rand::rng()
        .sample_iter(Alphanumeric)
        .take(GENERATION_ID_SUFFIX_LEN)
        .map(char::from)
        .collect();
    format!("{GENERATION_ID_PREFIX}{}_{suffix}", to_base36(millis))
}

/// Lowercase base36 rendering of `n` (`0` for zero).
fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize] as char);
        n /= 36;
    }
    out.iter().rev().collect()
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// A status-surface ID classified into one of the three families.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusId {
    /// Payment session ID (`cs_...`).
    Session(String),
    /// Generation ID (`veo3_...`).
    Generation(String),
    /// File ID of a produced video (UUID, normalized to lowercase).
    File(String),
}

/// Whether `id` is a well-formed payment session ID.
pub fn is_session_id(id: &str) -> bool {
    id.len() > SESSION_ID_PREFIX.len()
        && id.starts_with(SESSION_ID_PREFIX)
        && has_safe_charset(id)
}

/// Whether `id` is a well-formed generation ID.
pub fn is_generation_id(id: &str) -> bool {
    id.len() > GENERATION_ID_PREFIX.len()
        && id.starts_with(GENERATION_ID_PREFIX)
        && has_safe_charset(id)
}

/// Whether `id` is a well-formed (hyphenated) file UUID.
pub fn is_file_id(id: &str) -> bool {
    id.len() == 36 && uuid::Uuid::try_parse(id).is_ok()
}

/// Filename-safe charset: ASCII alphanumerics, `_`, and `-` only.
fn has_safe_charset(id: &str) -> bool {
    id.bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Classify an incoming ID, rejecting anything that is not a
/// well-formed member of one of the three families.
pub fn parse_status_id(id: &str) -> Result<StatusId, CoreError> {
    if is_session_id(id) {
        Ok(StatusId::Session(id.to_string()))
    } else if is_generation_id(id) {
        Ok(StatusId::Generation(id.to_string()))
    } else if is_file_id(id) {
        Ok(StatusId::File(id.to_ascii_lowercase()))
    } else {
        Err(CoreError::NotFound {
            entity: "Status",
            id: id.to_string(),
        })
    }
}

/// Validate a session ID on the webhook-status surface.
///
/// Unlike [`parse_status_id`], a malformed session ID here is a
/// *validation* failure (400), not a not-found outcome.
pub fn validate_session_id(id: &str) -> Result<(), CoreError> {
    if is_session_id(id) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Session ID must start with '{SESSION_ID_PREFIX}': got '{id}'"
        )))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
