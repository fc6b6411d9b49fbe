//! The `Prospect` record and its lifecycle states.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classifier::PainPoint;

/// Lifecycle status of a prospect's outreach email, as persisted in the
/// spreadsheet row. String encodings are stable; never rename a variant's
/// wire form without migrating existing rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SendStatus {
    /// Email generated, not yet sent.
    Pending,
    Sent,
    /// Transport failure; retried on the next sender run.
    SendFailed,
    /// The language model call failed; retried on the next build run.
    GenerationFailed,
    /// No contact email could be extracted; excluded from the send set.
    MissingContact,
}

impl SendStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SendStatus::Pending => "pending",
            SendStatus::Sent => "sent",
            SendStatus::SendFailed => "send_failed",
            SendStatus::GenerationFailed => "generation_failed",
            SendStatus::MissingContact => "missing_contact",
        }
    }

    /// Parse a persisted status string.
    ///
    /// Unrecognized values map to `GenerationFailed`: a row whose status we
    /// cannot interpret must never enter the send set.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "pending" => SendStatus::Pending,
            "sent" => SendStatus::Sent,
            "send_failed" => SendStatus::SendFailed,
            "missing_contact" => SendStatus::MissingContact,
            _ => SendStatus::GenerationFailed,
        }
    }

    /// Whether a row with this status belongs in the daily send set.
    /// Failed sends stay retryable; failed generations do not.
    #[must_use]
    pub fn is_sendable(self) -> bool {
        matches!(self, SendStatus::Pending | SendStatus::SendFailed)
    }
}

impl std::fmt::Display for SendStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category scores from the page-speed service, 0–100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceScores {
    pub performance: u8,
    pub accessibility: u8,
    pub seo: u8,
}

/// Aggregated review sentiment for one prospect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummary {
    /// Mean lexicon score across reviews, in `[-1.0, 1.0]`. `0.0` when no
    /// reviews were available.
    pub score: f32,
    pub review_count: usize,
    /// Pain phrases matched in review text.
    pub matched_phrases: Vec<String>,
}

impl SentimentSummary {
    /// Summary for a prospect with no reviews. Not an error state.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            score: 0.0,
            review_count: 0,
            matched_phrases: Vec::new(),
        }
    }
}

/// A public review fetched from the listing source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub text: String,
    pub rating: Option<f32>,
}

/// The generated outreach email for one prospect. Exactly one per prospect
/// per campaign run; regeneration overwrites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutreachEmail {
    pub subject: String,
    pub body: String,
    /// Name of the persona whose voice drafted the email.
    pub persona: String,
}

/// One candidate business moving through the enrichment pipeline.
///
/// Created by the business finder with listing fields only; each stage
/// fills in its own `Option` field. Persisted as one spreadsheet row keyed
/// by `listing_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prospect {
    /// Stable listing id from the places service; the upsert key.
    pub listing_id: String,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    /// Extracted and syntax-cleaned contact email.
    pub contact_email: Option<String>,
    /// Senior-level titles spotted on the website (owner, ceo, ...).
    pub found_titles: Vec<String>,
    pub pain_point: Option<PainPoint>,
    pub performance: Option<PerformanceScores>,
    pub sentiment: Option<SentimentSummary>,
    /// One-sentence positive opener generated from discovered facts.
    pub icebreaker: Option<String>,
    pub email: Option<OutreachEmail>,
    pub status: SendStatus,
    pub created_at: DateTime<Utc>,
    pub sent_at: Option<DateTime<Utc>>,
    /// Most recent outreach touch: the initial send or the latest
    /// follow-up. `None` until something has gone out.
    pub last_contact_at: Option<DateTime<Utc>>,
    /// Follow-up emails already sent, `0..=3`.
    pub follow_up_count: u8,
}

impl Prospect {
    /// A freshly discovered prospect, before any enrichment.
    #[must_use]
    pub fn new(listing_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            listing_id: listing_id.into(),
            name: name.into(),
            address: None,
            phone: None,
            website: None,
            contact_email: None,
            found_titles: Vec::new(),
            pain_point: None,
            performance: None,
            sentiment: None,
            icebreaker: None,
            email: None,
            status: SendStatus::Pending,
            created_at: Utc::now(),
            sent_at: None,
            last_contact_at: None,
            follow_up_count: 0,
        }
    }

    /// A prospect needs a name and at least one contact path (website or
    /// listing id) to proceed past the finder stage.
    #[must_use]
    pub fn has_contact_path(&self) -> bool {
        !self.name.trim().is_empty()
            && (self.website.is_some() || !self.listing_id.trim().is_empty())
    }

    /// Whether this row may be dispatched by the daily sender.
    #[must_use]
    pub fn is_sendable(&self) -> bool {
        self.status.is_sendable() && self.contact_email.is_some() && self.email.is_some()
    }

    /// When this prospect was last contacted. Rows written before the
    /// follow-up columns existed fall back to the initial send time.
    #[must_use]
    pub fn last_contact(&self) -> Option<DateTime<Utc>> {
        self.last_contact_at.or(self.sent_at)
    }
}
