//! Error types for the FAQ bridge.
//!
//! Ignorable webhook events (delivery receipts, status updates) are not
//! errors and never reach this type; they surface as `Ok(None)` from the
//! processing path.

use thiserror::Error;

/// Result type alias for bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Errors raised while configuring or serving the webhook.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Request body was not a valid webhook payload.
    #[error("invalid webhook payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// Transport-level failure talking to the store or the messaging API.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Document store answered with a non-success status.
    #[error("document store returned HTTP {status}: {body}")]
    StoreStatus {
        /// HTTP status code
        status: u16,
        /// Response body content
        body: String,
    },

    /// Messaging provider answered with a non-success status.
    #[error("messaging API returned HTTP {status}: {body}")]
    MessagingStatus {
        /// HTTP status code
        status: u16,
        /// Response body content
        body: String,
    },

    /// A required environment variable is not set.
    #[error("missing required configuration: {0}")]
    MissingConfig(&'static str),

    /// An environment variable is set but unusable.
    #[error("invalid configuration for {var}: {reason}")]
    InvalidConfig {
        /// Environment variable name
        var: &'static str,
        /// What is wrong with the value
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_errors_include_body() {
        let err = BridgeError::StoreStatus {
            status: 401,
            body: "missing scope".to_string(),
        };
        assert_eq!(err.to_string(), "document store returned HTTP 401: missing scope");
    }

    #[test]
    fn test_payload_error_from_serde() {
        let err: BridgeError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(err.to_string().starts_with("invalid webhook payload"));
    }
}
