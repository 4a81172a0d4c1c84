//! Inbound webhook payloads.
//!
//! ## Processing Flow
//!
//! ```text
//! request body → parse_event() → WebhookEvent → first_message() → Option<InboundMessage>
//! ```

pub mod extract;
pub mod types;

pub use extract::{event_from_value, first_message, parse_event};
pub use types::{InboundMessage, WebhookEvent};
