//! HTTP client for the places REST API.
//!
//! Wraps `reqwest` with places-specific error handling, API key management,
//! and typed response deserialization. Every endpoint checks the `"status"`
//! field in the JSON envelope; non-OK statuses surface as
//! [`PlacesError::ApiStatus`] (or [`PlacesError::QuotaExceeded`]).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use outreach_core::Review;

use crate::error::PlacesError;
use crate::retry::retry_with_backoff;
use crate::types::{BusinessListing, DetailsResponse, TextSearchResponse};
use crate::BusinessDirectory;

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com";

/// The places API requires a short pause before a next-page token becomes
/// valid.
const DEFAULT_PAGE_TOKEN_DELAY_MS: u64 = 2_000;

const DETAIL_FIELDS: &str = "place_id,name,formatted_address,formatted_phone_number,website";

/// Client for the places REST API.
///
/// Use [`PlacesClient::new`] for production or
/// [`PlacesClient::with_base_url`] to point at a mock server in tests.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
    page_token_delay_ms: u64,
}

impl PlacesClient {
    /// Creates a new client pointed at the production places API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, PlacesError> {
        Self::with_base_url(
            api_key,
            timeout_secs,
            user_agent,
            max_retries,
            backoff_base_ms,
            DEFAULT_BASE_URL,
        )
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::ApiStatus`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| PlacesError::ApiStatus {
            status: "INVALID_BASE_URL".to_owned(),
            message: Some(e.to_string()),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            max_retries,
            backoff_base_ms,
            page_token_delay_ms: DEFAULT_PAGE_TOKEN_DELAY_MS,
        })
    }

    /// Override the pre-pagination delay. Tests set this to zero.
    #[must_use]
    pub fn with_page_token_delay_ms(mut self, delay_ms: u64) -> Self {
        self.page_token_delay_ms = delay_ms;
        self
    }

    /// Finds up to `max_results` businesses for a free-text query,
    /// paginating until the cap is reached or results exhaust.
    ///
    /// Listings without a name are skipped. A failure on a later page
    /// stops pagination early and returns whatever was collected (with a
    /// warning); partial results are usable downstream.
    ///
    /// # Errors
    ///
    /// Returns an error only when the first page cannot be fetched at all,
    /// i.e. when there is nothing usable to hand downstream.
    pub async fn find_businesses(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<BusinessListing>, PlacesError> {
        let mut listings: Vec<BusinessListing> = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            if page_token.is_some() && self.page_token_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.page_token_delay_ms)).await;
            }

            let page = match self.text_search_page(query, page_token.as_deref()).await {
                Ok(page) => page,
                Err(e) if listings.is_empty() => return Err(e),
                Err(e) => {
                    tracing::warn!(
                        query,
                        collected = listings.len(),
                        error = %e,
                        "text search page failed — stopping early with partial results"
                    );
                    return Ok(listings);
                }
            };

            let (place_ids, next_token) = page;
            for place_id in place_ids {
                if listings.len() >= max_results {
                    return Ok(listings);
                }
                match self.place_details(&place_id).await {
                    Ok(Some(listing)) => listings.push(listing),
                    Ok(None) => {
                        tracing::debug!(place_id, "listing has no name — skipped");
                    }
                    Err(e) => {
                        tracing::warn!(place_id, error = %e, "place details fetch failed — skipped");
                    }
                }
            }

            match next_token {
                Some(token) if listings.len() < max_results => page_token = Some(token),
                _ => return Ok(listings),
            }
        }
    }

    /// Fetches one page of text-search results: place ids plus the token
    /// for the next page, if any.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::QuotaExceeded`] on `OVER_QUERY_LIMIT`.
    /// - [`PlacesError::ApiStatus`] on any other non-OK API status.
    /// - [`PlacesError::Http`] on network failure or non-2xx HTTP status.
    /// - [`PlacesError::Deserialize`] if the body does not match the schema.
    pub async fn text_search_page(
        &self,
        query: &str,
        page_token: Option<&str>,
    ) -> Result<(Vec<String>, Option<String>), PlacesError> {
        let mut params = vec![("query", query)];
        if let Some(token) = page_token {
            params.push(("pagetoken", token));
        }
        let url = self.build_url("maps/api/place/textsearch/json", &params);
        let body = self.request_json(&url).await?;

        let envelope: TextSearchResponse =
            serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
                context: format!("textsearch(query={query})"),
                source: e,
            })?;
        check_status(&envelope.status, envelope.error_message.as_deref())?;

        let ids = envelope
            .results
            .into_iter()
            .filter_map(|r| r.place_id)
            .collect();
        Ok((ids, envelope.next_page_token))
    }

    /// Fetches listing details for a place id.
    ///
    /// Returns `None` when the service has no name for the listing; such
    /// records cannot proceed past the finder stage.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`PlacesClient::text_search_page`].
    pub async fn place_details(
        &self,
        place_id: &str,
    ) -> Result<Option<BusinessListing>, PlacesError> {
        let url = self.build_url(
            "maps/api/place/details/json",
            &[("place_id", place_id), ("fields", DETAIL_FIELDS)],
        );
        let body = self.request_json(&url).await?;

        let envelope: DetailsResponse =
            serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
                context: format!("details(place_id={place_id})"),
                source: e,
            })?;
        check_status(&envelope.status, envelope.error_message.as_deref())?;

        let Some(details) = envelope.result else {
            return Ok(None);
        };
        let Some(name) = details.name.filter(|n| !n.trim().is_empty()) else {
            return Ok(None);
        };

        Ok(Some(BusinessListing {
            listing_id: details.place_id.unwrap_or_else(|| place_id.to_owned()),
            name,
            address: details.formatted_address,
            phone: details.formatted_phone_number,
            website: details.website,
        }))
    }

    /// Fetches public reviews for a place id. Empty when none exist.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`PlacesClient::text_search_page`].
    pub async fn fetch_reviews(&self, place_id: &str) -> Result<Vec<Review>, PlacesError> {
        let url = self.build_url(
            "maps/api/place/details/json",
            &[("place_id", place_id), ("fields", "reviews")],
        );
        let body = self.request_json(&url).await?;

        let envelope: DetailsResponse =
            serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
                context: format!("reviews(place_id={place_id})"),
                source: e,
            })?;
        check_status(&envelope.status, envelope.error_message.as_deref())?;

        let reviews = envelope
            .result
            .map(|details| {
                details
                    .reviews
                    .into_iter()
                    .filter_map(|r| {
                        r.text.filter(|t| !t.trim().is_empty()).map(|text| Review {
                            text,
                            rating: r.rating,
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(reviews)
    }

    /// Builds the full request URL with percent-encoded query parameters,
    /// appending the API key.
    fn build_url(&self, path: &str, extra: &[(&str, &str)]) -> Url {
        // base_url is validated in the constructor and always ends in '/',
        // so join cannot fail for a relative path.
        let mut url = self
            .base_url
            .join(path)
            .unwrap_or_else(|_| self.base_url.clone());
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        url
    }

    /// Sends a GET request with retry on transient errors, asserts a 2xx
    /// status, and parses the body as JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, PlacesError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || async move {
            let response = self.client.get(url.clone()).send().await?;
            let response = response.error_for_status()?;
            let body = response.json::<serde_json::Value>().await?;
            Ok(body)
        })
        .await
    }
}

/// Map the API envelope status to a result. `OK` and `ZERO_RESULTS` are
/// success; `ZERO_RESULTS` simply yields empty collections.
fn check_status(status: &str, message: Option<&str>) -> Result<(), PlacesError> {
    match status {
        "OK" | "ZERO_RESULTS" => Ok(()),
        "OVER_QUERY_LIMIT" => Err(PlacesError::QuotaExceeded),
        other => Err(PlacesError::ApiStatus {
            status: other.to_owned(),
            message: message.map(str::to_owned),
        }),
    }
}

#[async_trait]
impl BusinessDirectory for PlacesClient {
    async fn find_businesses(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<BusinessListing>, PlacesError> {
        PlacesClient::find_businesses(self, query, max_results).await
    }

    async fn reviews(&self, listing_id: &str) -> Result<Vec<Review>, PlacesError> {
        self.fetch_reviews(listing_id).await
    }
}
