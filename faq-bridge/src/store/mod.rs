//! Document store access for FAQ records and the interaction log.
//!
//! The FAQ collection is read page by page following a cursor so the record
//! set is never silently truncated by the store's default page size.

pub mod appwrite;

use async_trait::async_trait;
use tracing::info;

use crate::error::Result;
use crate::faq::{FaqRecord, InteractionRecord};

pub use appwrite::AppwriteStore;

/// One page of FAQ records.
#[derive(Debug, Clone, Default)]
pub struct FaqPage {
    pub records: Vec<FaqRecord>,
    /// Cursor for the following page, `None` when this was the last one
    pub next_cursor: Option<String>,
}

/// Storage backend for FAQ records and interaction logging.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch up to `limit` FAQ records after `cursor`, in store order.
    async fn list_faq_page(&self, cursor: Option<&str>, limit: usize) -> Result<FaqPage>;

    /// Append an interaction record to the log collection.
    async fn create_interaction(&self, record: &InteractionRecord) -> Result<()>;

    /// Fetch every FAQ record, preserving retrieval order across pages.
    async fn list_all_faqs(&self, page_size: usize) -> Result<Vec<FaqRecord>> {
        let mut records = Vec::new();
        let mut cursor: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let page = self.list_faq_page(cursor.as_deref(), page_size).await?;
            pages += 1;
            records.extend(page.records);

            match page.next_cursor {
                Some(next) if cursor.as_deref() != Some(next.as_str()) => cursor = Some(next),
                _ => break,
            }
        }

        info!(
            faq_count = records.len(),
            pages = pages,
            "faq_records_loaded"
        );

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Serves fixed records in pages and remembers the cursors it was asked for.
    struct PagedStore {
        records: Vec<FaqRecord>,
        cursors: Mutex<Vec<Option<String>>>,
    }

    #[async_trait]
    impl DocumentStore for PagedStore {
        async fn list_faq_page(&self, cursor: Option<&str>, limit: usize) -> Result<FaqPage> {
            self.cursors.lock().unwrap().push(cursor.map(str::to_string));

            let start = match cursor {
                Some(c) => self.records.iter().position(|r| r.id == c).map(|i| i + 1).unwrap_or(0),
                None => 0,
            };
            let records: Vec<FaqRecord> = self.records.iter().skip(start).take(limit).cloned().collect();
            let next_cursor = if records.len() == limit {
                records.last().map(|r| r.id.clone())
            } else {
                None
            };

            Ok(FaqPage { records, next_cursor })
        }

        async fn create_interaction(&self, _record: &InteractionRecord) -> Result<()> {
            Ok(())
        }
    }

    fn record(id: &str) -> FaqRecord {
        FaqRecord {
            id: id.to_string(),
            ..FaqRecord::new(format!("question {}", id), "", format!("answer {}", id))
        }
    }

    #[tokio::test]
    async fn test_list_all_faqs_follows_cursor() {
        let store = PagedStore {
            records: (1..=5).map(|i| record(&i.to_string())).collect(),
            cursors: Mutex::new(Vec::new()),
        };

        let all = store.list_all_faqs(2).await.unwrap();

        let ids: Vec<&str> = all.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
        assert_eq!(
            *store.cursors.lock().unwrap(),
            vec![None, Some("2".to_string()), Some("4".to_string())]
        );
    }

    #[tokio::test]
    async fn test_list_all_faqs_exact_page_boundary() {
        let store = PagedStore {
            records: (1..=4).map(|i| record(&i.to_string())).collect(),
            cursors: Mutex::new(Vec::new()),
        };

        let all = store.list_all_faqs(2).await.unwrap();

        assert_eq!(all.len(), 4);
        assert_eq!(store.cursors.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_list_all_faqs_empty_collection() {
        let store = PagedStore {
            records: Vec::new(),
            cursors: Mutex::new(Vec::new()),
        };

        assert!(store.list_all_faqs(100).await.unwrap().is_empty());
    }
}
