//! Error types for the Hypixel client library.

use thiserror::Error;

/// The main error type for all Hypixel client operations.
#[derive(Error, Debug)]
pub enum HypixelError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// The API rejected the key (HTTP 403)
    #[error("Invalid API key: {0}")]
    InvalidKey(String),

    /// The API throttled the key (HTTP 429)
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// The API answered with an unexpected status code
    #[error("HTTP {status} from {url}: {message}")]
    GenericHttp {
        /// The request URL
        url: String,
        /// The status code of the response
        status: u16,
        /// The status text of the response
        message: String,
    },

    /// Request timeout
    #[error("Request timed out")]
    Timeout,

    /// The call was cancelled by its cancellation token
    #[error("Request cancelled")]
    Cancelled,

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A response did not contain a field a helper expected
    #[error("\"{0}\" was not in the response")]
    MissingField(String),

    /// A response field had an unexpected JSON type
    #[error("\"{field}\" is not {expected}")]
    UnexpectedType {
        /// The offending field
        field: String,
        /// What the field was expected to be
        expected: &'static str,
    },

    /// The cache backend failed
    #[error("Cache error: {0}")]
    Cache(String),

    /// Inventory data could not be decoded
    #[error("NBT decode error: {0}")]
    Nbt(String),
}

impl HypixelError {
    /// Whether the error must be surfaced immediately instead of retried.
    ///
    /// Server verdicts (403, 429, unexpected status) and caller cancellation are
    /// fatal. Everything else (network failures, timeouts, undecodable bodies) is
    /// transient.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            HypixelError::InvalidKey(_)
                | HypixelError::RateLimited(_)
                | HypixelError::GenericHttp { .. }
                | HypixelError::Cancelled
                | HypixelError::Config(_)
                | HypixelError::Cache(_)
                | HypixelError::Nbt(_)
        )
    }

    /// Whether the orchestrator may retry the call after this error.
    pub fn is_retryable(&self) -> bool {
        !self.is_fatal()
    }

    /// The HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            HypixelError::InvalidKey(_) => Some(403),
            HypixelError::RateLimited(_) => Some(429),
            HypixelError::GenericHttp { status, .. } => Some(*status),
            HypixelError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
