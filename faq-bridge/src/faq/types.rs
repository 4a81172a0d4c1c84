//! FAQ and interaction record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A question/keywords/answer triple owned by the document store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FaqRecord {
    /// Store document id, also used as the pagination cursor
    #[serde(rename = "$id", default)]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub question: String,
    /// Free text or comma separated keywords
    #[serde(default, deserialize_with = "null_as_empty")]
    pub keywords: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub answer: String,
}

impl FaqRecord {
    pub fn new(question: impl Into<String>, keywords: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            question: question.into(),
            keywords: keywords.into(),
            answer: answer.into(),
        }
    }
}

/// Append-only log entry for one processed inbound message.
///
/// Serialized with the attribute names of the interactions collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractionRecord {
    #[serde(rename = "user_number")]
    pub sender: String,
    /// Normalized (trimmed, lower-cased) message text
    #[serde(rename = "user_message")]
    pub message_text: String,
    #[serde(rename = "bot_reply")]
    pub reply_text: String,
    #[serde(rename = "found_in_faq")]
    pub matched: bool,
    pub created_at: DateTime<Utc>,
}

impl InteractionRecord {
    /// Create a record stamped with the current time.
    pub fn new(sender: String, message_text: String, reply_text: String, matched: bool) -> Self {
        Self {
            sender,
            message_text,
            reply_text,
            matched,
            created_at: Utc::now(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
