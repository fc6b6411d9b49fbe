//! Typed pain-point observations produced by the enrichment stages.

use serde::{Deserialize, Serialize};

/// What a signal observes about a prospect's online presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    /// The prospect has no website, or the site could not be fetched or
    /// did not serve HTML. Highest-priority observation.
    NoUsableWebsite,
    MissingBlog,
    MissingCallToAction,
    MissingSocial,
    HasSocial,
    SlowPageLoad,
    LowSeoScore,
    NegativeReviews,
    /// A known pain phrase matched in review text.
    PainKeyword,
}

/// Which pipeline stage produced a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalSource {
    Scraper,
    Pagespeed,
    Reviews,
}

/// A single observation about one prospect, consumed by the classifier.
///
/// `detail` carries the concrete, human-readable fact behind the signal
/// (e.g. a matched review phrase or a measured score). Details feed the
/// email generator so drafts reference real findings rather than filler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PainPointSignal {
    pub kind: SignalKind,
    pub source: SignalSource,
    /// Relative strength in `[0.0, 1.0]`. The classifier treats weights
    /// as evidence strength when a pain point needs corroboration.
    pub weight: f32,
    pub detail: Option<String>,
}

impl PainPointSignal {
    #[must_use]
    pub fn new(kind: SignalKind, source: SignalSource, weight: f32) -> Self {
        Self {
            kind,
            source,
            weight,
            detail: None,
        }
    }

    #[must_use]
    pub fn with_detail(
        kind: SignalKind,
        source: SignalSource,
        weight: f32,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            source,
            weight,
            detail: Some(detail.into()),
        }
    }

    /// The concrete fact strings from a signal set, for prompt building.
    #[must_use]
    pub fn details(signals: &[PainPointSignal]) -> Vec<&str> {
        signals
            .iter()
            .filter_map(|s| s.detail.as_deref())
            .collect()
    }
}
