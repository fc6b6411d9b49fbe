use thiserror::Error;

/// Errors from the spreadsheet persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The spreadsheet API answered with a non-2xx status.
    #[error("spreadsheet API returned status {status}: {body}")]
    ApiStatus { status: u16, body: String },

    /// The response body did not match the expected values shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// No stored row carries the given listing id.
    #[error("no stored prospect with listing id {0}")]
    UnknownListing(String),
}
