//! Answering an inbound message: match, log, reply.
//!
//! Only the FAQ read can fail the request. The interaction log write and the
//! outbound reply are attempted independently and their failures are logged.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::error::Result;
use crate::faq::{find_match, normalize, InteractionRecord};
use crate::inbound::InboundMessage;
use crate::messaging::ReplySender;
use crate::store::DocumentStore;

/// Outcome of answering one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub reply: String,
    /// Whether the reply came from an FAQ record rather than the fallback
    pub matched: bool,
}

/// Answers inbound messages from the FAQ collection.
#[derive(Clone)]
pub struct Responder {
    store: Arc<dyn DocumentStore>,
    sender: Option<Arc<dyn ReplySender>>,
    fallback_reply: String,
    faq_page_size: usize,
}

impl Responder {
    /// Create a responder. `sender` is `None` when outbound credentials are
    /// not configured; replies are then computed and logged but not sent.
    pub fn new(
        store: Arc<dyn DocumentStore>,
        sender: Option<Arc<dyn ReplySender>>,
        fallback_reply: String,
        faq_page_size: usize,
    ) -> Self {
        Self {
            store,
            sender,
            fallback_reply,
            faq_page_size,
        }
    }

    /// Answer a message and record the interaction.
    pub async fn respond(&self, message: &InboundMessage) -> Result<Answer> {
        let user_text = normalize(&message.text);

        info!(
            from = %message.sender,
            message_id = ?message.message_id,
            message_type = ?message.message_type,
            timestamp = ?message.timestamp,
            text_length = user_text.len(),
            "responder_message_received"
        );

        let faqs = self.store.list_all_faqs(self.faq_page_size).await?;

        let answer = match find_match(&faqs, &user_text) {
            Some(faq) => {
                info!(faq_id = %faq.id, "faq_match_found");
                Answer {
                    reply: faq.answer.clone(),
                    matched: true,
                }
            }
            None => {
                info!(faq_count = faqs.len(), "faq_match_not_found");
                Answer {
                    reply: self.fallback_reply.clone(),
                    matched: false,
                }
            }
        };

        let record = InteractionRecord::new(
            message.sender.clone(),
            user_text,
            answer.reply.clone(),
            answer.matched,
        );

        if let Err(e) = self.store.create_interaction(&record).await {
            error!(error = %e, from = %message.sender, "interaction_persist_failed");
        }

        match &self.sender {
            Some(_) if message.sender.is_empty() => {
                warn!("reply_skipped_no_sender");
            }
            Some(sender) => {
                if let Err(e) = sender.send_text(&message.sender, &answer.reply).await {
                    error!(error = %e, to = %message.sender, "whatsapp_reply_failed");
                }
            }
            None => {
                info!(to = %message.sender, "whatsapp_credentials_missing_reply_not_sent");
            }
        }

        Ok(answer)
    }
}
