//! FAQ Bridge - WhatsApp webhook auto-responder backed by an Appwrite FAQ collection.
//!
//! ## Architecture
//!
//! ```text
//! WhatsApp → POST /webhook → parse → first message → FAQ match → log interaction → reply
//! ```
//!
//! Each request is handled independently; the only shared state is the
//! immutable configuration and the HTTP clients.

pub mod config;
pub mod error;
pub mod faq;
pub mod inbound;
pub mod messaging;
pub mod responder;
pub mod store;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use error::{BridgeError, Result};
pub use faq::{FaqRecord, InteractionRecord};
pub use inbound::{InboundMessage, WebhookEvent};
pub use messaging::{ReplySender, WhatsAppClient};
pub use responder::{Answer, Responder};
pub use store::{AppwriteStore, DocumentStore, FaqPage};
pub use web::{create_router, AppState};
