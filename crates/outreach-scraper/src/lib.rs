//! Web presence scraping and page-speed analysis.
//!
//! Fetches a prospect's public website, extracts conversion and content
//! signals (blog, calls-to-action, social links), finds contact emails and
//! senior titles across common contact pages, and scores page quality via
//! the page-speed API. Every failure mode degrades to a signal: an
//! unreachable or non-HTML site becomes the `NoUsableWebsite` observation,
//! never a batch abort.

pub mod client;
pub mod contacts;
pub mod error;
pub mod pagespeed;
pub mod presence;

use async_trait::async_trait;

pub use client::WebClient;
pub use contacts::{clean_email, ContactInfo};
pub use error::ScraperError;
pub use pagespeed::{performance_signals, PageSpeedClient};
pub use presence::PresenceAnalysis;

use outreach_core::{PainPointSignal, PerformanceScores};

/// Everything the scraper learned about one prospect's web presence.
#[derive(Debug, Clone, Default)]
pub struct PresenceReport {
    pub signals: Vec<PainPointSignal>,
    pub emails: Vec<String>,
    pub titles: Vec<String>,
}

/// Capability interface over website scraping.
///
/// `scrape` is infallible by contract: fetch and parse failures degrade to
/// the `NoUsableWebsite` signal inside the report.
#[async_trait]
pub trait WebPresence: Send + Sync {
    async fn scrape(&self, website: Option<&str>) -> PresenceReport;
}

/// Capability interface over the page-speed service.
///
/// `None` means "unknown performance"; the classifier must tolerate it.
#[async_trait]
pub trait PerformanceProbe: Send + Sync {
    async fn scores(&self, url: &str) -> Option<PerformanceScores>;
}
