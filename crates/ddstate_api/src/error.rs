//! Errors returned by Datadog API calls.

/// Errors that can occur while talking to the Datadog API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP client could not be initialised.
    #[error("failed to initialize Datadog API client: {0}")]
    ClientInit(String),

    /// The configured base URL cannot be used to build request URLs.
    #[error("invalid Datadog API URL: {0}")]
    InvalidBaseUrl(String),

    /// The request failed at the transport level (connect, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with an `errors` payload.
    ///
    /// The message is the remote error text, unmodified.
    #[error("{}", .errors.join("; "))]
    Rejected {
        /// HTTP status code of the response.
        status: u16,
        /// Error messages reported by the API.
        errors: Vec<String>,
    },

    /// The API answered with a non-success status and no `errors` payload.
    #[error("unexpected status code {status}: {body}")]
    Status {
        /// HTTP status code of the response.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// A success response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Returns the HTTP status code associated with this error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } | Self::Status { status, .. } => Some(*status),
            Self::ClientInit(_) | Self::InvalidBaseUrl(_) | Self::Http(_) | Self::Decode(_) => None,
        }
    }
}
