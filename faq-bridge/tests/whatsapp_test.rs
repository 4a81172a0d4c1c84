//! WhatsApp client tests against a wiremock server.

use std::collections::HashMap;

use serde_json::{json, Value};
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

use faqbridge::{BridgeError, Config, ReplySender, WhatsAppClient};

const MESSAGES_PATH: &str = "/v19.0/1098765/messages";

fn client_for(server: &MockServer) -> WhatsAppClient {
    let vars: HashMap<&str, String> = HashMap::from([
        ("APPWRITE_PROJECT_ID", "proj".to_string()),
        ("APPWRITE_API_KEY", "key".to_string()),
        ("APPWRITE_DATABASE_ID", "db".to_string()),
        ("APPWRITE_FAQ_COLLECTION_ID", "faqs".to_string()),
        ("APPWRITE_INTERACTIONS_COLLECTION_ID", "interactions".to_string()),
        ("WHATSAPP_TOKEN", "graph-token".to_string()),
        ("WHATSAPP_PHONE_NUMBER_ID", "1098765".to_string()),
        ("WHATSAPP_API_BASE_URL", server.uri()),
    ]);
    let config = Config::from_lookup(|name| vars.get(name).cloned()).expect("config should load");
    WhatsAppClient::new(&config).expect("client should build")
}

#[tokio::test]
async fn sends_text_message_with_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MESSAGES_PATH))
        .and(header("authorization", "Bearer graph-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messaging_product": "whatsapp",
            "contacts": [{"input": "16505551234", "wa_id": "16505551234"}],
            "messages": [{"id": "wamid.reply"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .send_text("16505551234", "9-5")
        .await
        .expect("send should succeed");

    let requests = server.received_requests().await.expect("request recording enabled");
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["messaging_product"], "whatsapp");
    assert_eq!(body["to"], "16505551234");
    assert_eq!(body["text"]["body"], "9-5");
}

#[tokio::test]
async fn success_with_unexpected_body_is_ok() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MESSAGES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    assert!(client_for(&server).send_text("1", "hi").await.is_ok());
}

#[tokio::test]
async fn error_status_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MESSAGES_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Invalid OAuth access token.", "code": 190}
        })))
        .expect(1)
        .mount(&server)
        .await;

    match client_for(&server).send_text("1", "hi").await {
        Err(BridgeError::MessagingStatus { status, body }) => {
            assert_eq!(status, 401);
            assert!(body.contains("Invalid OAuth access token"));
        }
        other => panic!("Expected MessagingStatus error, got {:?}", other),
    }
}
