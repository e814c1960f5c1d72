//! Error types for content service access

/// Transport and protocol failures talking to the content service
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP transport failure (connect, timeout, body read)
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("unexpected status {status} from {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// The GraphQL response carried errors
    #[error("graphql error: {0}")]
    GraphQl(String),

    /// Request could not be built from the inputs
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Response body did not match the expected shape
    #[error("deserialization failed: {0}")]
    Deserialize(#[from] serde_json::Error),

    /// Caller cancelled the operation
    #[error("operation cancelled")]
    Canceled,
}

impl ClientError {
    /// Create status error
    pub fn status(status: u16, url: impl Into<String>) -> Self {
        Self::Status {
            status,
            url: url.into(),
        }
    }

    /// Whether the caller cancelled the operation
    #[inline]
    #[must_use]
    pub fn is_canceled(&self) -> bool {
        matches!(self, Self::Canceled)
    }
}
