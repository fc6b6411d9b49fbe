//! In-memory store for tests and dry runs.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use outreach_core::{Prospect, SendStatus};

use crate::error::StoreError;
use crate::ProspectStore;

/// Prospect store held in a process-local map, keyed by listing id.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<HashMap<String, Prospect>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-load rows, e.g. prior-campaign prospects in a dedupe test.
    #[must_use]
    pub fn seeded(prospects: Vec<Prospect>) -> Self {
        let rows = prospects
            .into_iter()
            .map(|p| (p.listing_id.clone(), p))
            .collect();
        Self {
            rows: Mutex::new(rows),
        }
    }
}

#[async_trait]
impl ProspectStore for MemoryStore {
    async fn get(&self, listing_id: &str) -> Result<Option<Prospect>, StoreError> {
        let rows = self.rows.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(rows.get(listing_id).cloned())
    }

    async fn list(&self) -> Result<Vec<Prospect>, StoreError> {
        let rows = self.rows.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut all: Vec<Prospect> = rows.values().cloned().collect();
        all.sort_by(|a, b| a.listing_id.cmp(&b.listing_id));
        Ok(all)
    }

    async fn upsert(&self, prospect: &Prospect) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        rows.insert(prospect.listing_id.clone(), prospect.clone());
        Ok(())
    }

    async fn update_status(
        &self,
        listing_id: &str,
        status: SendStatus,
        sent_at: Option<DateTime<Utc>>,
    ) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let Some(prospect) = rows.get_mut(listing_id) else {
            return Err(StoreError::UnknownListing(listing_id.to_owned()));
        };
        prospect.status = status;
        if sent_at.is_some() {
            prospect.sent_at = sent_at;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upsert_then_list_round_trips() {
        let store = MemoryStore::new();
        store.upsert(&Prospect::new("b", "Beta")).await.unwrap();
        store.upsert(&Prospect::new("a", "Alpha")).await.unwrap();

        let all = store.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].listing_id, "a");
    }

    #[tokio::test]
    async fn upsert_overwrites_by_listing_id() {
        let store = MemoryStore::new();
        store.upsert(&Prospect::new("a", "Old Name")).await.unwrap();
        store.upsert(&Prospect::new("a", "New Name")).await.unwrap();

        let all = store.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "New Name");
    }

    #[tokio::test]
    async fn get_finds_one_row_by_listing_id() {
        let store = MemoryStore::seeded(vec![Prospect::new("a", "Alpha")]);
        assert_eq!(store.get("a").await.unwrap().unwrap().name, "Alpha");
        assert!(store.get("zzz").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_status_sets_sent_at() {
        let store = MemoryStore::new();
        store.upsert(&Prospect::new("a", "Alpha")).await.unwrap();

        let now = Utc::now();
        store
            .update_status("a", SendStatus::Sent, Some(now))
            .await
            .unwrap();

        let all = store.list().await.unwrap();
        assert_eq!(all[0].status, SendStatus::Sent);
        assert_eq!(all[0].sent_at, Some(now));
    }

    #[tokio::test]
    async fn update_status_for_unknown_listing_fails() {
        let store = MemoryStore::new();
        let err = store
            .update_status("ghost", SendStatus::Sent, None)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UnknownListing(_)));
    }
}
