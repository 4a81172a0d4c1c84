//! Body parsing and message extraction.

use serde_json::Value;
use tracing::info;

use crate::error::Result;
use crate::inbound::types::{InboundMessage, WebhookEvent};

/// Parse a raw request body into a webhook event.
///
/// Accepts a JSON object or a JSON string that itself holds serialized JSON
/// (some relays forward the body double-encoded). An empty body or `null` is
/// an empty event, which extracts to no message.
pub fn parse_event(body: &[u8]) -> Result<WebhookEvent> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(WebhookEvent::default());
    }

    let value: Value = serde_json::from_slice(body)?;
    event_from_value(value)
}

/// Convert already-parsed JSON into a webhook event.
pub fn event_from_value(value: Value) -> Result<WebhookEvent> {
    match value {
        Value::Null => Ok(WebhookEvent::default()),
        Value::String(raw) => {
            if raw.trim().is_empty() {
                return Ok(WebhookEvent::default());
            }
            info!(raw_length = raw.len(), "webhook_body_double_encoded");
            let inner: Value = serde_json::from_str(&raw)?;
            match inner {
                Value::Null => Ok(WebhookEvent::default()),
                other => Ok(serde_json::from_value(other)?),
            }
        }
        other => Ok(serde_json::from_value(other)?),
    }
}

/// Extract `entry[0].changes[0].value.messages[0]`.
///
/// Returns `None` when the event carries no message, such as delivery or
/// read receipts. A message without a sender is still returned, with an
/// empty `sender`.
pub fn first_message(event: &WebhookEvent) -> Option<InboundMessage> {
    let message = event
        .entry
        .as_ref()?
        .first()?
        .changes
        .as_ref()?
        .first()?
        .value
        .as_ref()?
        .messages
        .as_ref()?
        .first()?;

    let sender = message
        .from
        .as_ref()
        .and_then(scalar_text)
        .map(|s| s.trim().to_string())
        .unwrap_or_default();

    let text = message
        .text
        .as_ref()
        .and_then(|t| t.body.clone())
        .unwrap_or_default();

    Some(InboundMessage {
        message_id: message.id.as_ref().and_then(scalar_text),
        sender,
        message_type: message.msg_type.as_ref().and_then(scalar_text),
        timestamp: message.timestamp.as_ref().and_then(scalar_text),
        text,
    })
}

/// Render a string or number as text; other JSON types yield `None`.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
