//! Deterministic pain-point classification.
//!
//! Pure function over the union of signals collected for one prospect.
//! The priority order is a total, order-sensitive walk: the first pain
//! point whose trigger condition matches wins. `Generic` always matches,
//! so a fully-missing signal set classifies as `Generic`.

use serde::{Deserialize, Serialize};

use crate::signals::{PainPointSignal, SignalKind};

/// A `LowSeoScore` signal needs this much weight to count as a
/// poor-performance trigger on its own.
const SEO_CORROBORATION_WEIGHT: f32 = 1.0;

/// The classified dominant deficiency for one prospect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PainPoint {
    NoWebsite,
    PoorPerformance,
    PoorReputation,
    LowVisibility,
    Generic,
}

/// Default priority order. Configurable via `personas.yaml`; any
/// configured order has `Generic` appended if omitted, so classification
/// is always total.
pub const DEFAULT_PRIORITY: [PainPoint; 5] = [
    PainPoint::NoWebsite,
    PainPoint::PoorPerformance,
    PainPoint::PoorReputation,
    PainPoint::LowVisibility,
    PainPoint::Generic,
];

impl PainPoint {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PainPoint::NoWebsite => "no-website",
            PainPoint::PoorPerformance => "poor-performance",
            PainPoint::PoorReputation => "poor-reputation",
            PainPoint::LowVisibility => "low-visibility",
            PainPoint::Generic => "generic",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "no-website" => Some(PainPoint::NoWebsite),
            "poor-performance" => Some(PainPoint::PoorPerformance),
            "poor-reputation" => Some(PainPoint::PoorReputation),
            "low-visibility" => Some(PainPoint::LowVisibility),
            "generic" => Some(PainPoint::Generic),
            _ => None,
        }
    }

    /// Whether this pain point's trigger condition holds for `signals`.
    fn triggered_by(self, signals: &[PainPointSignal]) -> bool {
        let has = |kind: SignalKind| signals.iter().any(|s| s.kind == kind);
        match self {
            PainPoint::NoWebsite => has(SignalKind::NoUsableWebsite),
            PainPoint::PoorPerformance => {
                has(SignalKind::SlowPageLoad)
                    || signals.iter().any(|s| {
                        s.kind == SignalKind::LowSeoScore && s.weight >= SEO_CORROBORATION_WEIGHT
                    })
            }
            PainPoint::PoorReputation => {
                has(SignalKind::NegativeReviews) || has(SignalKind::PainKeyword)
            }
            PainPoint::LowVisibility => {
                has(SignalKind::MissingSocial)
                    || (has(SignalKind::MissingBlog) && has(SignalKind::MissingCallToAction))
            }
            PainPoint::Generic => true,
        }
    }
}

impl std::fmt::Display for PainPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a prospect's signal set into exactly one pain point.
///
/// Walks `priority` in order and returns the first pain point whose
/// trigger condition matches. Falls back to `Generic` even when the
/// configured order omits it, so the function is total.
#[must_use]
pub fn classify(signals: &[PainPointSignal], priority: &[PainPoint]) -> PainPoint {
    for &pain in priority {
        if pain.triggered_by(signals) {
            return pain;
        }
    }
    PainPoint::Generic
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::{SignalKind, SignalSource};

    fn sig(kind: SignalKind) -> PainPointSignal {
        PainPointSignal::new(kind, SignalSource::Scraper, 1.0)
    }

    #[test]
    fn empty_signal_set_classifies_generic() {
        assert_eq!(classify(&[], &DEFAULT_PRIORITY), PainPoint::Generic);
    }

    #[test]
    fn no_usable_website_wins_over_everything() {
        let signals = vec![
            sig(SignalKind::SlowPageLoad),
            sig(SignalKind::NegativeReviews),
            sig(SignalKind::MissingSocial),
            sig(SignalKind::NoUsableWebsite),
        ];
        assert_eq!(classify(&signals, &DEFAULT_PRIORITY), PainPoint::NoWebsite);
    }

    #[test]
    fn slow_page_load_classifies_poor_performance() {
        let signals = vec![sig(SignalKind::SlowPageLoad), sig(SignalKind::MissingBlog)];
        assert_eq!(
            classify(&signals, &DEFAULT_PRIORITY),
            PainPoint::PoorPerformance
        );
    }

    #[test]
    fn weak_seo_score_alone_is_not_poor_performance() {
        let signals = vec![PainPointSignal::new(
            SignalKind::LowSeoScore,
            SignalSource::Pagespeed,
            0.5,
        )];
        assert_eq!(classify(&signals, &DEFAULT_PRIORITY), PainPoint::Generic);
    }

    #[test]
    fn full_weight_seo_score_is_poor_performance() {
        let signals = vec![PainPointSignal::new(
            SignalKind::LowSeoScore,
            SignalSource::Pagespeed,
            1.0,
        )];
        assert_eq!(
            classify(&signals, &DEFAULT_PRIORITY),
            PainPoint::PoorPerformance
        );
    }

    #[test]
    fn pain_keyword_classifies_poor_reputation() {
        let signals = vec![PainPointSignal::with_detail(
            SignalKind::PainKeyword,
            SignalSource::Reviews,
            1.0,
            "never called back",
        )];
        assert_eq!(
            classify(&signals, &DEFAULT_PRIORITY),
            PainPoint::PoorReputation
        );
    }

    #[test]
    fn missing_blog_alone_is_not_low_visibility() {
        let signals = vec![sig(SignalKind::MissingBlog)];
        assert_eq!(classify(&signals, &DEFAULT_PRIORITY), PainPoint::Generic);
    }

    #[test]
    fn missing_blog_and_cta_together_are_low_visibility() {
        let signals = vec![
            sig(SignalKind::MissingBlog),
            sig(SignalKind::MissingCallToAction),
        ];
        assert_eq!(
            classify(&signals, &DEFAULT_PRIORITY),
            PainPoint::LowVisibility
        );
    }

    #[test]
    fn missing_social_is_low_visibility() {
        let signals = vec![sig(SignalKind::MissingSocial)];
        assert_eq!(
            classify(&signals, &DEFAULT_PRIORITY),
            PainPoint::LowVisibility
        );
    }

    #[test]
    fn custom_priority_order_changes_the_winner() {
        // Reputation outranks performance in this configured order.
        let priority = [
            PainPoint::NoWebsite,
            PainPoint::PoorReputation,
            PainPoint::PoorPerformance,
            PainPoint::LowVisibility,
            PainPoint::Generic,
        ];
        let signals = vec![
            sig(SignalKind::SlowPageLoad),
            sig(SignalKind::NegativeReviews),
        ];
        assert_eq!(classify(&signals, &priority), PainPoint::PoorReputation);
        assert_eq!(
            classify(&signals, &DEFAULT_PRIORITY),
            PainPoint::PoorPerformance
        );
    }

    #[test]
    fn classification_is_total_without_generic_in_the_order() {
        let priority = [PainPoint::NoWebsite];
        assert_eq!(classify(&[], &priority), PainPoint::Generic);
    }

    #[test]
    fn pain_point_string_round_trip() {
        for pain in DEFAULT_PRIORITY {
            assert_eq!(PainPoint::parse(pain.as_str()), Some(pain));
        }
        assert_eq!(PainPoint::parse("nonsense"), None);
    }
}
