//! Appwrite Databases REST client.
//!
//! Only the two calls the bridge needs: list documents (with limit and
//! cursor queries) and create document.
//! Reference: https://appwrite.io/docs/references/cloud/server-rest/databases

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{BridgeError, Result};
use crate::faq::{FaqRecord, InteractionRecord};
use crate::store::{DocumentStore, FaqPage};

/// Appwrite's placeholder asking the server to generate a document id.
const UNIQUE_ID: &str = "unique()";

/// Response body of the list documents endpoint.
#[derive(Debug, Deserialize)]
struct DocumentList {
    #[serde(default)]
    total: u64,
    #[serde(default)]
    documents: Vec<FaqRecord>,
}

/// Request body of the create document endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateDocument<'a, T> {
    document_id: &'a str,
    data: &'a T,
}

/// Appwrite-backed document store.
#[derive(Clone)]
pub struct AppwriteStore {
    client: Client,
    endpoint: String,
    project_id: String,
    api_key: String,
    database_id: String,
    faq_collection_id: String,
    interactions_collection_id: String,
}

impl AppwriteStore {
    /// Build a store client from the loaded configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.appwrite_endpoint.clone(),
            project_id: config.appwrite_project_id.clone(),
            api_key: config.appwrite_api_key.clone(),
            database_id: config.appwrite_database_id.clone(),
            faq_collection_id: config.faq_collection_id.clone(),
            interactions_collection_id: config.interactions_collection_id.clone(),
        })
    }

    fn documents_url(&self, collection_id: &str) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.endpoint, self.database_id, collection_id
        )
    }

    fn request(&self, method: reqwest::Method, url: String) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .header("X-Appwrite-Project", &self.project_id)
            .header("X-Appwrite-Key", &self.api_key)
    }
}

#[async_trait]
impl DocumentStore for AppwriteStore {
    async fn list_faq_page(&self, cursor: Option<&str>, limit: usize) -> Result<FaqPage> {
        let mut queries = vec![("queries[]", json!({"method": "limit", "values": [limit]}).to_string())];
        if let Some(cursor) = cursor {
            queries.push((
                "queries[]",
                json!({"method": "cursorAfter", "values": [cursor]}).to_string(),
            ));
        }

        let response = self
            .request(reqwest::Method::GET, self.documents_url(&self.faq_collection_id))
            .query(&queries)
            .send()
            .await?;

        let list: DocumentList = check_status(response).await?.json().await?;

        let next_cursor = if list.documents.len() >= limit {
            list.documents.last().map(|d| d.id.clone()).filter(|id| !id.is_empty())
        } else {
            None
        };

        info!(
            collection = %self.faq_collection_id,
            has_cursor = cursor.is_some(),
            page_len = list.documents.len(),
            total = list.total,
            "appwrite_faq_page_fetched"
        );

        Ok(FaqPage {
            records: list.documents,
            next_cursor,
        })
    }

    async fn create_interaction(&self, record: &InteractionRecord) -> Result<()> {
        let body = CreateDocument {
            document_id: UNIQUE_ID,
            data: record,
        };

        let response = self
            .request(
                reqwest::Method::POST,
                self.documents_url(&self.interactions_collection_id),
            )
            .json(&body)
            .send()
            .await?;

        check_status(response).await?;

        info!(
            collection = %self.interactions_collection_id,
            matched = record.matched,
            "appwrite_interaction_created"
        );

        Ok(())
    }
}

/// Turn a non-success response into `BridgeError::StoreStatus`.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unable to read response body".to_string());

    warn!(status_code = status.as_u16(), body = %body, "appwrite_request_failed");

    Err(BridgeError::StoreStatus {
        status: status.as_u16(),
        body,
    })
}
