//! HTTP client for fetching prospect websites.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::contacts;
use crate::error::ScraperError;
use crate::presence;
use crate::{PresenceReport, WebPresence};

use outreach_core::{PainPointSignal, SignalKind, SignalSource};

/// HTTP client for prospect websites.
///
/// Fetches pages with a configured timeout and user agent, and classifies
/// unreachable hosts, non-2xx statuses, and non-HTML bodies as typed
/// errors so the caller can degrade them to the `NoUsableWebsite` signal.
pub struct WebClient {
    pub(crate) client: Client,
}

impl WebClient {
    /// Creates a `WebClient` with configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches one page and returns its HTML body.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`] on a non-2xx response.
    /// - [`ScraperError::NonHtml`] when the content type is not HTML.
    /// - [`ScraperError::Http`] on network failure or timeout.
    pub async fn fetch_html(&self, url: &Url) -> Result<String, ScraperError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_owned();
        // Some small-business hosts omit the header entirely; treat that
        // as HTML and let the parser sort it out.
        if !content_type.is_empty()
            && !content_type.contains("text/html")
            && !content_type.contains("application/xhtml")
        {
            return Err(ScraperError::NonHtml {
                url: url.to_string(),
                content_type,
            });
        }

        Ok(response.text().await?)
    }
}

/// Parse a website URL, defaulting the scheme to `http://` when absent.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidUrl`] if the value still does not parse.
pub fn normalize_url(raw: &str) -> Result<Url, ScraperError> {
    let trimmed = raw.trim();
    let candidate = if trimmed.contains("://") {
        trimmed.to_owned()
    } else {
        format!("http://{trimmed}")
    };
    Url::parse(&candidate).map_err(|_| ScraperError::InvalidUrl(raw.to_owned()))
}

fn no_website_report(detail: impl Into<String>) -> PresenceReport {
    PresenceReport {
        signals: vec![PainPointSignal::with_detail(
            SignalKind::NoUsableWebsite,
            SignalSource::Scraper,
            1.0,
            detail,
        )],
        emails: Vec::new(),
        titles: Vec::new(),
    }
}

#[async_trait]
impl WebPresence for WebClient {
    async fn scrape(&self, website: Option<&str>) -> PresenceReport {
        let Some(raw) = website.filter(|w| !w.trim().is_empty()) else {
            return no_website_report("no website found");
        };

        let base = match normalize_url(raw) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!(website = raw, error = %e, "website URL does not parse");
                return no_website_report(format!("website address is unusable ({raw})"));
            }
        };

        let html = match self.fetch_html(&base).await {
            Ok(html) => html,
            Err(e) => {
                tracing::debug!(website = %base, error = %e, "website fetch failed");
                return no_website_report("website could not be reached");
            }
        };

        let analysis = presence::analyze(&html);
        let contact = contacts::find_contacts(self, &base, &html).await;

        PresenceReport {
            signals: analysis.signals(),
            emails: contact.emails,
            titles: contact.titles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_url_defaults_scheme() {
        let url = normalize_url("greenthumb.example.com").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.host_str(), Some("greenthumb.example.com"));
    }

    #[test]
    fn normalize_url_keeps_existing_scheme() {
        let url = normalize_url("https://greenthumb.example.com/about").unwrap();
        assert_eq!(url.scheme(), "https");
    }

    #[test]
    fn normalize_url_rejects_garbage() {
        assert!(matches!(
            normalize_url("ht tp://not a url"),
            Err(ScraperError::InvalidUrl(_))
        ));
    }
}
