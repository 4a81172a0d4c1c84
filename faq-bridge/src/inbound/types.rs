//! WhatsApp Cloud API webhook payload types.
//!
//! Every field is optional: the provider sends many event shapes through the
//! same endpoint (messages, delivery receipts, read statuses) and only a small
//! subset of the tree matters here.
//!
//! ```text
//! {entry:[{changes:[{value:{messages:[{from, text:{body}}]}}]}]}
//! ```

use serde::Deserialize;
use serde_json::Value;

/// Root webhook payload.
///
/// Siblings such as `object`, `entry[].id` and `changes[].field` are not
/// modelled; unknown keys are skipped whatever their JSON type.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookEvent {
    #[serde(default)]
    pub entry: Option<Vec<Entry>>,
}

/// Entry object containing changes for one business account.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub changes: Option<Vec<Change>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Change {
    #[serde(default)]
    pub value: Option<ChangeValue>,
}

/// Value object holding messages. Receipts carry `statuses` instead.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangeValue {
    #[serde(default)]
    pub messages: Option<Vec<Message>>,
}

/// A single inbound message.
///
/// Scalar metadata is kept as raw JSON so a number where a string is
/// expected does not reject the whole delivery.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Message {
    /// Provider message id (wamid)
    #[serde(default)]
    pub id: Option<Value>,
    /// Sender's WhatsApp id (phone number)
    #[serde(default)]
    pub from: Option<Value>,
    /// Message type: "text", "image", "interactive", ...
    #[serde(default, rename = "type")]
    pub msg_type: Option<Value>,
    #[serde(default)]
    pub timestamp: Option<Value>,
    #[serde(default)]
    pub text: Option<TextBody>,
}

/// Text content of a message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextBody {
    #[serde(default)]
    pub body: Option<String>,
}

/// The parts of an inbound message the responder works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Provider message id, when present
    pub message_id: Option<String>,
    /// Sender identifier; replies go back here. Empty when the provider
    /// omitted it.
    pub sender: String,
    pub message_type: Option<String>,
    pub timestamp: Option<String>,
    /// Raw message text, empty for non-text messages
    pub text: String,
}
