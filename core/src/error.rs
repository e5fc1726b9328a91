//! Error types for the API client.
//!
//! # Design
//! Status-code failures are split the way the vendor reports them: HTTP 429
//! carries the rate-limit reset time, other error responses carry the vendor
//! message when the body has one, and everything else falls back to the bare
//! status code.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned by `Client` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A mandatory credential was empty when the client was configured.
    #[error("missing auth data: {0}")]
    MissingAuthData(&'static str),

    /// A dashboard (accounts) endpoint was called without account credentials.
    #[error("missing auth data: accounts API requires account id, username and password")]
    MissingAccountsCredentials,

    /// The server returned 429.
    #[error("RateLimitError: reset at {reset}")]
    RateLimited { reset: DateTime<Utc> },

    /// The server returned an error status with a readable message or code.
    #[error("{message}")]
    Vendor {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// The server returned an error status without a usable body.
    #[error("Http code {status}")]
    Http { status: u16 },

    /// The request payload could not be encoded.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response body could not be decoded into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("transport error: {0}")]
    Transport(#[from] ureq::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// HTTP status behind the error, when the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::RateLimited { .. } => Some(429),
            ApiError::Vendor { status, .. } | ApiError::Http { status } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
