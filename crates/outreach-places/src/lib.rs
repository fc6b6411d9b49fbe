//! Places/maps API client for business discovery.
//!
//! Wraps the places text-search, place-details, and review endpoints with
//! typed error handling, retry with back-off on transient failures, and
//! the [`BusinessDirectory`] capability trait so the orchestrator can run
//! against a deterministic fake in tests.

pub mod client;
pub mod error;
pub mod types;

mod retry;

use async_trait::async_trait;

pub use client::PlacesClient;
pub use error::PlacesError;
pub use types::BusinessListing;

use outreach_core::Review;

/// Capability interface over the places service.
#[async_trait]
pub trait BusinessDirectory: Send + Sync {
    /// Find up to `max_results` businesses matching a free-text query.
    ///
    /// May return fewer than `max_results` when the service exhausts or a
    /// later page fails (partial results are usable downstream). May
    /// contain duplicates across re-runs; de-duplication by listing id is
    /// the caller's responsibility.
    async fn find_businesses(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<BusinessListing>, PlacesError>;

    /// Fetch public reviews for a listing. Empty when none exist.
    async fn reviews(&self, listing_id: &str) -> Result<Vec<Review>, PlacesError>;
}
