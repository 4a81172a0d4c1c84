//! Outbound replies to the messaging provider.

pub mod whatsapp;

use async_trait::async_trait;

use crate::error::Result;

pub use whatsapp::WhatsAppClient;

/// Sends a text reply to a user. Failures are reported, never retried.
#[async_trait]
pub trait ReplySender: Send + Sync {
    async fn send_text(&self, to: &str, body: &str) -> Result<()>;
}
