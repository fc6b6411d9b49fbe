use thiserror::Error;

/// Errors returned by the places API client.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API reported `OVER_QUERY_LIMIT`; pagination stops immediately.
    #[error("places API quota exceeded")]
    QuotaExceeded,

    /// The API returned a non-OK status with an optional message.
    #[error("places API error: {status}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    ApiStatus {
        status: String,
        message: Option<String>,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
