//! Error types for the submit step.

use thiserror::Error;

/// Errors that can occur while submitting mapped records.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SubmitError {
    /// Submit attempted before any logical field was mapped.
    #[error("no columns selected")]
    NoSelection,

    /// Endpoint is not an absolute http(s) URL.
    #[error("invalid upload endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// Request never got a response.
    #[error("network error: {0}")]
    Network(String),

    /// Backend answered with a non-success status.
    #[error("upload rejected with status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body as returned by the backend.
        body: String,
    },
}

impl SubmitError {
    /// Returns a short message suitable for the end of a CLI run.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::NoSelection => "Map at least one field before uploading.",
            Self::InvalidEndpoint { .. } => "The upload endpoint is not a valid URL.",
            Self::Network(_) => "Could not reach the upload endpoint.",
            Self::Status { .. } => "The backend rejected the upload.",
        }
    }

    /// Whether nothing was sent because of local state.
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(self, Self::NoSelection | Self::InvalidEndpoint { .. })
    }
}

impl From<reqwest::Error> for SubmitError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// Result type alias for submit operations.
pub type Result<T> = std::result::Result<T, SubmitError>;
