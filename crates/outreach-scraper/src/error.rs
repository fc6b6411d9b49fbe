use thiserror::Error;

/// Errors from website fetching and page-speed scoring.
///
/// All of these are degradable: the pipeline converts them into signals
/// or "unknown" stage results rather than propagating them.
#[derive(Debug, Error)]
pub enum ScraperError {
    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The URL could not be parsed even after scheme defaulting.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The server answered with a non-2xx status.
    #[error("unexpected HTTP status {status} for {url}")]
    UnexpectedStatus { url: String, status: u16 },

    /// The response body is not HTML (e.g. a PDF brochure site).
    #[error("non-HTML content type '{content_type}' for {url}")]
    NonHtml { url: String, content_type: String },

    /// The page-speed response body did not match the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The page-speed response carried no usable lighthouse analysis.
    #[error("no lighthouse analysis for {0}")]
    MissingAnalysis(String),
}
