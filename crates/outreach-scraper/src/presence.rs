//! Pure signal extraction from homepage HTML.
//!
//! Regex/string scanning over the raw markup — no DOM construction. An
//! empty result set means the page has none of the tracked features,
//! which is an observation, not a failure.

use std::sync::OnceLock;

use regex::Regex;

use outreach_core::{PainPointSignal, SignalKind, SignalSource};

/// Conversion phrases that count as a call-to-action when present in the
/// page's visible text.
const CTA_PHRASES: &[&str] = &[
    "get a quote",
    "free quote",
    "request a quote",
    "get an estimate",
    "free estimate",
    "request an estimate",
    "contact us",
    "schedule a consultation",
    "book now",
    "request service",
    "learn more",
];

const SOCIAL_MEDIA_DOMAINS: &[&str] = &[
    "facebook.com",
    "instagram.com",
    "twitter.com",
    "linkedin.com",
    "youtube.com",
    "tiktok.com",
];

/// Content and conversion features observed on one homepage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresenceAnalysis {
    pub has_blog: bool,
    pub cta_phrases: Vec<String>,
    pub social_links: Vec<String>,
}

fn anchor_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?is)<a\s[^>]*href\s*=\s*["']([^"']+)["'][^>]*>(.*?)</a>"#)
            .expect("valid anchor regex")
    })
}

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<script.*?</script>|<style.*?</style>|<[^>]+>").expect("valid tag regex"))
}

/// Strip scripts, styles, and markup, leaving lowercased visible text.
pub(crate) fn visible_text_lower(html: &str) -> String {
    tag_regex().replace_all(html, " ").to_lowercase()
}

/// Analyze homepage HTML for blog presence, CTA phrases, and social links.
#[must_use]
pub fn analyze(html: &str) -> PresenceAnalysis {
    let text = visible_text_lower(html);

    let mut has_blog = false;
    let mut social_links: Vec<String> = Vec::new();
    for cap in anchor_regex().captures_iter(html) {
        let href = cap.get(1).map_or("", |m| m.as_str());
        let label = cap.get(2).map_or("", |m| m.as_str());
        let href_lower = href.to_lowercase();

        if href_lower.contains("blog") || label.to_lowercase().contains("blog") {
            has_blog = true;
        }
        if SOCIAL_MEDIA_DOMAINS.iter().any(|d| href_lower.contains(d))
            && !social_links.iter().any(|s| s == href)
        {
            social_links.push(href.to_owned());
        }
    }

    let cta_phrases = CTA_PHRASES
        .iter()
        .filter(|phrase| text.contains(**phrase))
        .map(|phrase| (*phrase).to_owned())
        .collect();

    PresenceAnalysis {
        has_blog,
        cta_phrases,
        social_links,
    }
}

impl PresenceAnalysis {
    /// Convert the analysis into classifier signals, with concrete fact
    /// strings attached for the email generator.
    #[must_use]
    pub fn signals(&self) -> Vec<PainPointSignal> {
        let mut signals = Vec::new();

        if !self.has_blog {
            signals.push(PainPointSignal::with_detail(
                SignalKind::MissingBlog,
                SignalSource::Scraper,
                1.0,
                "no blog or news section on the website",
            ));
        }
        if self.cta_phrases.is_empty() {
            signals.push(PainPointSignal::with_detail(
                SignalKind::MissingCallToAction,
                SignalSource::Scraper,
                1.0,
                "no clear call-to-action on the homepage",
            ));
        }
        if self.social_links.is_empty() {
            signals.push(PainPointSignal::with_detail(
                SignalKind::MissingSocial,
                SignalSource::Scraper,
                1.0,
                "no social media profiles linked from the website",
            ));
        } else {
            signals.push(PainPointSignal::with_detail(
                SignalKind::HasSocial,
                SignalSource::Scraper,
                0.5,
                format!("existing social profile: {}", self.social_links[0]),
            ));
        }

        signals
    }
}
