//! Error types for Vercel API operations.
//!
//! This module provides the error type shared by all Vercel clients, the
//! remote error envelope returned by the API, and conversions from the
//! underlying HTTP, URL and JSON error types.

use serde::Deserialize;
use thiserror::Error;

/// Main error type for Vercel operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// No API token was supplied
    #[error("missing Vercel API token")]
    MissingToken,

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Request timed out
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The API host could not be reached
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Invalid endpoint URL
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// A request could not be assembled
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The API answered with an error envelope
    #[error("Vercel API error {status} ({code}): {message}")]
    Api {
        /// HTTP status code of the response
        status: u16,
        /// Machine-readable error code, e.g. `not_found`
        code: String,
        /// Human-readable message
        message: String,
    },

    /// A response body could not be decoded
    #[error("Failed to decode response: {0}")]
    DecodeError(String),
}

/// Specialized result type for Vercel operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error envelope returned by the Vercel API on failure.
///
/// ```json
/// {"error": {"code": "not_found", "message": "Project not found"}}
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ErrorResponse {
    /// Error details
    #[serde(default)]
    pub error: Option<ErrorContent>,
}

/// Remote error descriptor.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ErrorContent {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    #[serde(default)]
    pub message: String,
}

impl ErrorResponse {
    /// Decodes an error envelope from a response body and turns it into an [`Error`].
    ///
    /// A body that is not valid JSON, or an envelope without an `error` object,
    /// yields [`Error::DecodeError`] rather than a synthesized remote error.
    #[must_use]
    pub fn decode(status: u16, body: &[u8]) -> Error {
        match serde_json::from_slice::<Self>(body) {
            Ok(Self {
                error: Some(content),
            }) => Error::Api {
                status,
                code: content.code,
                message: content.message,
            },
            Ok(Self { error: None }) => Error::DecodeError(format!(
                "error response with status {status} has no `error` object"
            )),
            Err(err) => Error::from(err),
        }
    }
}

impl Error {
    /// Returns the error code for this error.
    ///
    /// For remote API failures this is the code sent by Vercel, which callers
    /// may branch on. Local failures use fixed upper-case codes.
    #[must_use]
    pub fn error_code(&self) -> &str {
        match self {
            Self::MissingToken => "MISSING_TOKEN",
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::HttpError(_) => "HTTP_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::Api { code, .. } => code,
            Self::DecodeError(_) => "DECODE_ERROR",
        }
    }

    /// Returns the remote error code if the API rejected the request.
    #[must_use]
    pub fn remote_code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Returns the HTTP status of a remote API failure.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the API reported the resource as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.remote_code() == Some("not_found")
    }

    /// Returns true if this error comes from the transport rather than the API.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::HttpError(_) | Self::Timeout(_) | Self::ServiceUnavailable(_)
        )
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::ServiceUnavailable(err.to_string())
        } else if err.is_decode() {
            Self::DecodeError(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::DecodeError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ValidationError(err.to_string())
    }
}
