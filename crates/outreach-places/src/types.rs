//! Wire types for the places API plus the domain-facing listing record.

use serde::Deserialize;

/// A raw listing record as produced by the business finder.
///
/// Listings without a name are dropped before this type is built, so
/// `name` is always present; everything else is best-effort.
#[derive(Debug, Clone)]
pub struct BusinessListing {
    pub listing_id: String,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
}

// ---------------------------------------------------------------------------
// Wire envelopes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct TextSearchResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub results: Vec<TextSearchResult>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TextSearchResult {
    #[serde(default)]
    pub place_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DetailsResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub result: Option<PlaceDetails>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlaceDetails {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub formatted_phone_number: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub reviews: Vec<WireReview>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireReview {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub rating: Option<f32>,
}
