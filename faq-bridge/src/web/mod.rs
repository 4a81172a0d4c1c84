//! Web server module for the WhatsApp webhook.
//!
//! Routes:
//! - `GET  /health`  - liveness
//! - `GET  /webhook` - subscription handshake
//! - `POST /webhook` - event delivery

pub mod handlers;
pub mod signature;
pub mod verification;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

pub use handlers::{
    health, process_delivery, receive_webhook, verify_webhook, AppState, HealthResponse,
    WebhookResponse, REJECTION_BODY,
};
pub use signature::{verify_payload_signature, SIGNATURE_HEADER};
pub use verification::{verify_subscription, VerifyQuery};

/// Build the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/webhook", get(verify_webhook).post(receive_webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
