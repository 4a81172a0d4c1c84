//! WhatsApp webhook payload signature verification.
//!
//! Meta signs every delivery with HMAC-SHA256 of the raw request body, keyed
//! by the app secret, and sends it as `X-Hub-Signature-256: sha256=<hex>`.
//! Reference: https://developers.facebook.com/docs/graph-api/webhooks/getting-started#validate-payloads

use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::warn;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the payload signature.
pub const SIGNATURE_HEADER: &str = "X-Hub-Signature-256";

const SIGNATURE_PREFIX: &str = "sha256=";

/// Verify a delivery signature header against the raw body.
///
/// # Arguments
///
/// * `app_secret` - The Meta app secret
/// * `body` - The raw request body, byte for byte as received
/// * `header` - The `X-Hub-Signature-256` header value, if present
///
/// # Returns
///
/// `true` if the signature is present and matches, `false` otherwise.
pub fn verify_payload_signature(app_secret: &str, body: &[u8], header: Option<&str>) -> bool {
    let provided = match header {
        Some(h) if !h.trim().is_empty() => h.trim(),
        _ => {
            warn!("whatsapp_signature_missing");
            return false;
        }
    };

    let provided_hex = match provided.strip_prefix(SIGNATURE_PREFIX) {
        Some(hex) => hex.to_ascii_lowercase(),
        None => {
            warn!("whatsapp_signature_bad_prefix");
            return false;
        }
    };

    let mut mac = match HmacSha256::new_from_slice(app_secret.as_bytes()) {
        Ok(m) => m,
        Err(_) => {
            warn!("whatsapp_signature_invalid_key");
            return false;
        }
    };

    mac.update(body);

    let expected_hex = hex::encode(mac.finalize().into_bytes());

    let valid = constant_time_compare(&expected_hex, &provided_hex);

    if !valid {
        warn!(
            expected_length = expected_hex.len(),
            actual_length = provided_hex.len(),
            "whatsapp_signature_mismatch"
        );
    }

    valid
}

/// Constant-time string comparison to prevent timing attacks.
pub(crate) fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}
