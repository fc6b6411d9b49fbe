//! Campaign persistence on a shared spreadsheet.
//!
//! The spreadsheet doubles as the team's visible campaign dashboard, so
//! rows use stable, human-readable cell encodings rather than opaque
//! blobs. [`ProspectStore`] is the seam: the pipeline and sender depend on
//! the trait, with [`SheetsStore`] in production and [`MemoryStore`] in
//! tests.

pub mod error;
pub mod memory;
pub mod row;
pub mod sheets;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use outreach_core::{Prospect, SendStatus};

pub use error::StoreError;
pub use memory::MemoryStore;
pub use sheets::SheetsStore;

/// Capability interface over campaign persistence.
#[async_trait]
pub trait ProspectStore: Send + Sync {
    /// The row keyed by `listing_id`, if present.
    async fn get(&self, listing_id: &str) -> Result<Option<Prospect>, StoreError>;

    /// All stored prospects, header and blank rows excluded.
    async fn list(&self) -> Result<Vec<Prospect>, StoreError>;

    /// Insert or overwrite the row keyed by the prospect's listing id.
    async fn upsert(&self, prospect: &Prospect) -> Result<(), StoreError>;

    /// Update one row's send status, setting `sent_at` when given.
    async fn update_status(
        &self,
        listing_id: &str,
        status: SendStatus,
        sent_at: Option<DateTime<Utc>>,
    ) -> Result<(), StoreError>;
}
