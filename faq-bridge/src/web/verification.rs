//! Webhook subscription handshake.
//!
//! When the webhook URL is registered, the provider sends
//! `GET ?hub.mode=subscribe&hub.verify_token=<secret>&hub.challenge=<nonce>`
//! and expects the challenge echoed back verbatim.

use serde::Deserialize;
use tracing::{info, warn};

use crate::web::signature::constant_time_compare;

/// Query parameters of the handshake request.
///
/// All optional so a malformed handshake is rejected with 403 rather than
/// failing extraction.
#[derive(Debug, Default, Deserialize)]
pub struct VerifyQuery {
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

/// Check a handshake and return the challenge to echo if it is accepted.
pub fn verify_subscription(query: &VerifyQuery, expected_token: Option<&str>) -> Option<String> {
    let Some(expected) = expected_token else {
        warn!("webhook_verify_token_not_configured");
        return None;
    };

    if query.mode.as_deref() != Some("subscribe") {
        warn!(mode = ?query.mode, "webhook_verify_bad_mode");
        return None;
    }

    let token_ok = query
        .verify_token
        .as_deref()
        .map(|token| constant_time_compare(token, expected))
        .unwrap_or(false);

    if !token_ok {
        warn!("webhook_verify_token_mismatch");
        return None;
    }

    let challenge = query.challenge.clone();
    if challenge.is_none() {
        warn!("webhook_verify_challenge_missing");
    } else {
        info!("webhook_verified");
    }
    challenge
}
