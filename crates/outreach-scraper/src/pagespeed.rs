//! Page-speed scoring client.
//!
//! Calls the page-speed v5 API and extracts the performance,
//! accessibility, and SEO category scores on a 0..=100 scale. Every failure
//! collapses to "unknown performance" (`None`) at the [`PerformanceProbe`]
//! boundary; the classifier handles a missing score without crashing.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use outreach_core::{PainPointSignal, PerformanceScores, SignalKind, SignalSource};

use crate::error::ScraperError;
use crate::PerformanceProbe;

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com";

/// Scores below this mark a page as underperforming.
const LOW_SCORE_THRESHOLD: u8 = 50;
/// SEO scores below this carry full classifier weight on their own.
const SEVERE_SEO_THRESHOLD: u8 = 30;

/// Client for the page-speed scoring API.
pub struct PageSpeedClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct PageSpeedResponse {
    #[serde(rename = "lighthouseResult")]
    lighthouse_result: Option<LighthouseResult>,
}

#[derive(Debug, Deserialize)]
struct LighthouseResult {
    categories: Categories,
}

#[derive(Debug, Deserialize)]
struct Categories {
    performance: Option<Category>,
    accessibility: Option<Category>,
    seo: Option<Category>,
}

#[derive(Debug, Deserialize)]
struct Category {
    /// Fractional score in `[0.0, 1.0]`.
    score: Option<f64>,
}

impl PageSpeedClient {
    /// Creates a new client pointed at the production page-speed API.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the client cannot be constructed,
    /// or [`ScraperError::InvalidUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            // Lighthouse runs are slow; give the service more room than a
            // plain page fetch.
            .timeout(Duration::from_secs(timeout_secs.max(60)))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url =
            Url::parse(&normalised).map_err(|_| ScraperError::InvalidUrl(base_url.to_owned()))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Runs a page-speed analysis for `url` with the desktop strategy.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Http`] on network failure or non-2xx status.
    /// - [`ScraperError::Deserialize`] when the body does not match the
    ///   expected lighthouse shape.
    /// - [`ScraperError::MissingAnalysis`] when the lighthouse result or
    ///   any requested category score is absent.
    pub async fn analyze(&self, url: &str) -> Result<PerformanceScores, ScraperError> {
        // Constructor guarantees a trailing slash, so join cannot fail here.
        let mut request_url = self
            .base_url
            .join("pagespeedonline/v5/runPagespeed")
            .unwrap_or_else(|_| self.base_url.clone());
        {
            let mut pairs = request_url.query_pairs_mut();
            pairs.append_pair("url", url);
            pairs.append_pair("key", &self.api_key);
            pairs.append_pair("strategy", "desktop");
            // Repeated category params, matching the API's parameter style.
            pairs.append_pair("category", "PERFORMANCE");
            pairs.append_pair("category", "ACCESSIBILITY");
            pairs.append_pair("category", "SEO");
        }

        let response = self.client.get(request_url).send().await?;
        let response = response.error_for_status()?;
        let body = response.json::<serde_json::Value>().await?;

        let parsed: PageSpeedResponse =
            serde_json::from_value(body).map_err(|e| ScraperError::Deserialize {
                context: format!("runPagespeed(url={url})"),
                source: e,
            })?;

        let Some(result) = parsed.lighthouse_result else {
            return Err(ScraperError::MissingAnalysis(url.to_owned()));
        };
        let categories = result.categories;

        // A category the service could not score is no evidence of a bad
        // score; the whole analysis counts as unknown.
        let (Some(performance), Some(accessibility), Some(seo)) = (
            to_percent(categories.performance),
            to_percent(categories.accessibility),
            to_percent(categories.seo),
        ) else {
            return Err(ScraperError::MissingAnalysis(url.to_owned()));
        };

        Ok(PerformanceScores {
            performance,
            accessibility,
            seo,
        })
    }
}

/// Convert a fractional lighthouse score to 0..=100.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_percent(category: Option<Category>) -> Option<u8> {
    category
        .and_then(|c| c.score)
        .map(|score| (score.clamp(0.0, 1.0) * 100.0).round() as u8)
}

/// Derive classifier signals from a (possibly missing) score set.
///
/// `None` contributes nothing: unknown performance is not evidence of
/// poor performance.
#[must_use]
pub fn performance_signals(scores: Option<&PerformanceScores>) -> Vec<PainPointSignal> {
    let Some(scores) = scores else {
        return Vec::new();
    };

    let mut signals = Vec::new();
    if scores.performance < LOW_SCORE_THRESHOLD {
        signals.push(PainPointSignal::with_detail(
            SignalKind::SlowPageLoad,
            SignalSource::Pagespeed,
            1.0,
            format!("page performance score {}/100", scores.performance),
        ));
    }
    if scores.seo < LOW_SCORE_THRESHOLD {
        let weight = if scores.seo < SEVERE_SEO_THRESHOLD { 1.0 } else { 0.5 };
        signals.push(PainPointSignal::with_detail(
            SignalKind::LowSeoScore,
            SignalSource::Pagespeed,
            weight,
            format!("search visibility score {}/100", scores.seo),
        ));
    }
    signals
}

#[async_trait]
impl PerformanceProbe for PageSpeedClient {
    async fn scores(&self, url: &str) -> Option<PerformanceScores> {
        match self.analyze(url).await {
            Ok(scores) => Some(scores),
            Err(e) => {
                tracing::warn!(url, error = %e, "page-speed analysis failed, treating as unknown");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_scores_produce_no_signals() {
        assert!(performance_signals(None).is_empty());
    }

    #[test]
    fn healthy_scores_produce_no_signals() {
        let scores = PerformanceScores {
            performance: 92,
            accessibility: 88,
            seo: 85,
        };
        assert!(performance_signals(Some(&scores)).is_empty());
    }

    #[test]
    fn slow_page_emits_signal_with_measured_score() {
        let scores = PerformanceScores {
            performance: 37,
            accessibility: 80,
            seo: 90,
        };
        let signals = performance_signals(Some(&scores));
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].kind, SignalKind::SlowPageLoad);
        assert_eq!(signals[0].detail.as_deref(), Some("page performance score 37/100"));
    }

    #[test]
    fn severe_seo_score_carries_full_weight() {
        let scores = PerformanceScores {
            performance: 80,
            accessibility: 80,
            seo: 20,
        };
        let signals = performance_signals(Some(&scores));
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].kind, SignalKind::LowSeoScore);
        assert!((signals[0].weight - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn moderate_seo_score_carries_half_weight() {
        let scores = PerformanceScores {
            performance: 80,
            accessibility: 80,
            seo: 45,
        };
        let signals = performance_signals(Some(&scores));
        assert!((signals[0].weight - 0.5).abs() < f32::EPSILON);
    }
}
