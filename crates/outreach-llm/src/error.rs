use thiserror::Error;

/// Errors from the chat-completion API.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// The request ran past the configured timeout.
    #[error("chat API request timed out")]
    Timeout,

    /// The configured base URL does not parse.
    #[error("invalid chat API base URL: {0}")]
    InvalidBaseUrl(String),

    /// The API answered with a non-2xx status.
    #[error("chat API returned status {status}: {body}")]
    ApiStatus { status: u16, body: String },

    /// The completion came back with no choices or an empty message.
    #[error("chat API returned an empty completion")]
    EmptyCompletion,

    /// The completion text could not be parsed into the expected shape.
    #[error("malformed completion for {context}: {source}")]
    MalformedCompletion {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Http(e)
        }
    }
}
