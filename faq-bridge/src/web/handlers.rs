//! Webhook endpoint handlers.
//!
//! GET performs the subscription handshake. POST receives event deliveries:
//! 1. Verify the payload signature (if an app secret is configured)
//! 2. Parse the body and extract the first message
//! 3. Answer it through the responder
//!
//! Every error is converted here, once, into a `{status: "error"}` response.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::error::Result;
use crate::inbound::{first_message, parse_event};
use crate::messaging::{ReplySender, WhatsAppClient};
use crate::responder::{Answer, Responder};
use crate::store::AppwriteStore;
use crate::web::signature::{verify_payload_signature, SIGNATURE_HEADER};
use crate::web::verification::{verify_subscription, VerifyQuery};
use crate::Config;

/// Body returned when a handshake is rejected.
pub const REJECTION_BODY: &str = "Forbidden";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub responder: Responder,
}

impl AppState {
    pub fn new(config: Config, responder: Responder) -> Self {
        Self {
            config: Arc::new(config),
            responder,
        }
    }

    /// Wire the Appwrite store and, when credentials are present, the
    /// WhatsApp client.
    pub fn from_config(config: Config) -> Result<Self> {
        let store = AppwriteStore::new(&config)?;

        let sender: Option<Arc<dyn ReplySender>> = if config.messaging_enabled() {
            Some(Arc::new(WhatsAppClient::new(&config)?))
        } else {
            warn!("whatsapp_credentials_missing_replies_disabled");
            None
        };

        let responder = Responder::new(
            Arc::new(store),
            sender,
            config.fallback_reply.clone(),
            config.faq_page_size,
        );

        Ok(Self::new(config, responder))
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Subscription Handshake
// =============================================================================

/// Webhook verification endpoint (GET).
///
/// Returns the challenge as plain text with 200, or 403.
pub async fn verify_webhook(
    State(state): State<AppState>,
    Query(query): Query<VerifyQuery>,
) -> Response {
    match verify_subscription(&query, state.config.verify_token.as_deref()) {
        Some(challenge) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain")],
            challenge,
        )
            .into_response(),
        None => (
            StatusCode::FORBIDDEN,
            [(header::CONTENT_TYPE, "text/plain")],
            REJECTION_BODY,
        )
            .into_response(),
    }
}

// =============================================================================
// Event Delivery
// =============================================================================

/// Webhook response.
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl WebhookResponse {
    fn status(status: &'static str) -> Self {
        Self {
            status,
            reply: None,
            matched: None,
            message: None,
        }
    }

    pub fn ignored() -> Self {
        Self::status("ignored")
    }

    pub fn unauthorized() -> Self {
        Self::status("unauthorized")
    }

    pub fn success(answer: Answer) -> Self {
        Self {
            reply: Some(answer.reply),
            matched: Some(answer.matched),
            ..Self::status("success")
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            message: Some(message),
            ..Self::status("error")
        }
    }
}

/// Webhook receiver endpoint (POST).
pub async fn receive_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    info!(body_length = body.len(), "webhook_received");

    if let Some(secret) = state.config.app_secret.as_deref() {
        let signature = headers
            .get(SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok());

        if !verify_payload_signature(secret, &body, signature) {
            return (StatusCode::UNAUTHORIZED, Json(WebhookResponse::unauthorized()));
        }
    }

    match process_delivery(&state.responder, &body).await {
        Ok(Some(answer)) => {
            info!(matched = answer.matched, "webhook_answered");
            (StatusCode::OK, Json(WebhookResponse::success(answer)))
        }
        Ok(None) => {
            info!("webhook_ignored_no_message");
            (StatusCode::OK, Json(WebhookResponse::ignored()))
        }
        Err(e) => {
            error!(error = %e, "webhook_processing_failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(WebhookResponse::error(e.to_string())),
            )
        }
    }
}

/// Parse a delivery body and answer its first message.
///
/// Returns `Ok(None)` for events that carry no message.
pub async fn process_delivery(responder: &Responder, body: &[u8]) -> Result<Option<Answer>> {
    let event = parse_event(body)?;

    let Some(message) = first_message(&event) else {
        if event.entry.is_none() {
            warn!("webhook_payload_without_entry");
        }
        return Ok(None);
    };

    responder.respond(&message).await.map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_shapes() {
        let ignored = serde_json::to_value(WebhookResponse::ignored()).unwrap();
        assert_eq!(ignored, serde_json::json!({"status": "ignored"}));

        let success = serde_json::to_value(WebhookResponse::success(Answer {
            reply: "9-5".to_string(),
            matched: true,
        }))
        .unwrap();
        assert_eq!(
            success,
            serde_json::json!({"status": "success", "reply": "9-5", "matched": true})
        );

        let error = serde_json::to_value(WebhookResponse::error("boom".to_string())).unwrap();
        assert_eq!(error, serde_json::json!({"status": "error", "message": "boom"}));
    }
}
