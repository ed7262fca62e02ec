//! Error types used throughout the SDK
//!
//! Every failure mode of a request surfaces as a single [`ApiError`]: local
//! serialization problems, network failures, malformed payloads and business
//! errors reported by the server itself.

use thiserror::Error;

/// Main error type for LedgerLink operations
#[derive(Error, Debug, Clone)]
pub enum ApiError {
    /// The request never produced a usable response (DNS, TLS, connection
    /// reset, timeout).
    #[error("Network error: {0}")]
    Transport(String),

    /// The server answered but the response carried no payload.
    #[error("Data was not retrieved from request")]
    NoData,

    /// A business error reported by the server inside an otherwise valid
    /// payload. The raw bytes are kept for diagnostics.
    #[error("{class}: {message}")]
    Api {
        class: String,
        message: String,
        documentation_url: String,
        raw: Option<Vec<u8>>,
    },

    /// A date-typed field carried a literal that matches none of the
    /// supported formats.
    #[error("cannot decode date string `{0}`")]
    MalformedDate(String),

    /// The payload did not match the expected envelope shape.
    #[error("Decoding error: {0}")]
    Decoding(String),

    /// Request parameters could not be serialized. Raised before any
    /// network traffic.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The trust precondition rejected the connection before dispatch.
    #[error("Certificate pinning failed: {0}")]
    Pinning(String),

    /// The cursor chain exceeded the configured page cap.
    #[error("pagination aborted after {0} pages")]
    PaginationLimitExceeded(usize),
}

impl ApiError {
    /// The server-reported error class, when this is a business error.
    pub fn api_class(&self) -> Option<&str> {
        match self {
            Self::Api { class, .. } => Some(class),
            _ => None,
        }
    }

    /// Whether the request failed before reaching the network.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Encoding(_) | Self::Pinning(_))
    }
}

/// Result type alias for LedgerLink operations
pub type Result<T> = std::result::Result<T, ApiError>;
