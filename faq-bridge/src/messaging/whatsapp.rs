//! WhatsApp Cloud API client for sending text replies.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{BridgeError, Result};
use crate::messaging::ReplySender;

/// Outgoing text message body.
#[derive(Debug, Serialize)]
pub struct OutgoingTextMessage<'a> {
    pub messaging_product: &'static str,
    pub recipient_type: &'static str,
    pub to: &'a str,
    #[serde(rename = "type")]
    pub msg_type: &'static str,
    pub text: OutgoingText<'a>,
}

#[derive(Debug, Serialize)]
pub struct OutgoingText<'a> {
    pub body: &'a str,
}

impl<'a> OutgoingTextMessage<'a> {
    pub fn new(to: &'a str, body: &'a str) -> Self {
        Self {
            messaging_product: "whatsapp",
            recipient_type: "individual",
            to,
            msg_type: "text",
            text: OutgoingText { body },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SendResponse {
    #[serde(default)]
    messages: Vec<SentMessage>,
}

#[derive(Debug, Deserialize)]
struct SentMessage {
    id: String,
}

/// WhatsApp API client bound to one sender phone number.
#[derive(Clone)]
pub struct WhatsAppClient {
    client: Client,
    /// Full `/messages` endpoint for the configured phone number
    endpoint: String,
    auth_token: String,
}

impl WhatsAppClient {
    /// Build a client from configuration.
    ///
    /// Fails with `MissingConfig` when the token or phone number id is unset;
    /// check `Config::messaging_enabled` first.
    pub fn new(config: &Config) -> Result<Self> {
        let auth_token = config
            .whatsapp_token
            .clone()
            .ok_or(BridgeError::MissingConfig("WHATSAPP_TOKEN"))?;
        let phone_number_id = config
            .whatsapp_phone_number_id
            .as_deref()
            .ok_or(BridgeError::MissingConfig("WHATSAPP_PHONE_NUMBER_ID"))?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/{}/{}/messages",
                config.whatsapp_api_base_url, config.whatsapp_api_version, phone_number_id
            ),
            auth_token,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ReplySender for WhatsAppClient {
    async fn send_text(&self, to: &str, body: &str) -> Result<()> {
        let message = OutgoingTextMessage::new(to, body);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.auth_token)
            .json(&message)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());

            warn!(status_code = status.as_u16(), body = %body, "whatsapp_send_rejected");

            return Err(BridgeError::MessagingStatus {
                status: status.as_u16(),
                body,
            });
        }

        // The id is only logged, so an unexpected body is not a failure.
        let sent: SendResponse = response.json().await.unwrap_or_default();

        info!(
            to = %to,
            provider_message_id = ?sent.messages.first().map(|m| m.id.as_str()),
            "whatsapp_reply_sent"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_outgoing_text_message_shape() {
        let value = serde_json::to_value(OutgoingTextMessage::new("16505551234", "9-5")).unwrap();

        assert_eq!(value["messaging_product"], "whatsapp");
        assert_eq!(value["to"], "16505551234");
        assert_eq!(value["type"], "text");
        assert_eq!(value["text"]["body"], "9-5");
    }

    #[test]
    fn test_endpoint_from_config() {
        let vars = HashMap::from([
            ("APPWRITE_PROJECT_ID", "proj"),
            ("APPWRITE_API_KEY", "key"),
            ("APPWRITE_DATABASE_ID", "db"),
            ("APPWRITE_FAQ_COLLECTION_ID", "faqs"),
            ("APPWRITE_INTERACTIONS_COLLECTION_ID", "interactions"),
            ("WHATSAPP_TOKEN", "token"),
            ("WHATSAPP_PHONE_NUMBER_ID", "1098765"),
        ]);
        let config = Config::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap();

        let client = WhatsAppClient::new(&config).unwrap();
        assert_eq!(client.endpoint(), "https://graph.facebook.com/v19.0/1098765/messages");
    }
}
