//! Error types for the form-replay client.
//!
//! These never leave the crate's public entry points as `Err`; the client
//! folds them into a [`LookupResult`](crate::LookupResult) failure.

use crate::result::ErrorKind;
use std::fmt;
use syndicate_core::ValidationError;
use thiserror::Error;

/// The two HTTP exchanges of a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// GET that harvests the hidden form tokens
    FetchTokens,
    /// POST that submits the search form
    SubmitSearch,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FetchTokens => write!(f, "token fetch (GET)"),
            Self::SubmitSearch => write!(f, "search submission (POST)"),
        }
    }
}

/// Errors raised by a [`FormTransport`](crate::FormTransport) or its sessions.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Request exceeded the configured timeout
    #[error("request to {url} timed out after {seconds}s")]
    Timeout {
        /// Target URL
        url: String,
        /// Timeout that elapsed
        seconds: u64,
    },

    /// TCP/TLS connection could not be established
    #[error("connection to {url} failed: {message}")]
    Connect {
        /// Target URL
        url: String,
        /// Underlying error text
        message: String,
    },

    /// Any other failure while sending the request or reading the body
    #[error("request to {url} failed: {message}")]
    Request {
        /// Target URL
        url: String,
        /// Underlying error text
        message: String,
    },

    /// The HTTP session could not be created
    #[error("failed to create HTTP session: {0}")]
    Session(String),
}

impl TransportError {
    /// Whether this failure happened on the wire, as opposed to local setup.
    #[must_use]
    pub fn is_network(&self) -> bool {
        !matches!(self, Self::Session(_))
    }
}

/// Everything that can stop a lookup short of a syndicate name.
#[derive(Error, Debug)]
pub enum LookupError {
    /// Identifier rejected before any network activity
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Transport-level failure
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Remote answered with a non-2xx status
    #[error("{phase} returned HTTP {status}")]
    HttpStatus {
        /// Exchange that failed
        phase: Phase,
        /// Status code received
        status: u16,
    },

    /// Well-formed request, but the result field was absent or empty
    #[error("No data found for this national number.")]
    NotFound,

    /// Anything else, e.g. an HTML selector that failed to compile
    #[error("{0}")]
    Internal(String),
}

impl LookupError {
    /// Map this error onto the public failure taxonomy.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::ValidationError,
            Self::Transport(err) if err.is_network() => ErrorKind::NetworkError,
            Self::HttpStatus { .. } => ErrorKind::NetworkError,
            Self::NotFound => ErrorKind::NotFoundError,
            Self::Transport(_) | Self::Internal(_) => ErrorKind::UnknownError,
        }
    }
}

/// Result type alias for lookup internals.
pub type Result<T> = std::result::Result<T, LookupError>;

/// Result type alias for transport operations.
pub type TransportResult<T> = std::result::Result<T, TransportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let err: LookupError = ValidationError::InvalidFormat.into();
        assert_eq!(err.kind(), ErrorKind::ValidationError);

        let err: LookupError = TransportError::Timeout {
            url: "https://data.eea.org.eg/lastpaid.aspx".to_string(),
            seconds: 15,
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::NetworkError);

        let err = LookupError::HttpStatus {
            phase: Phase::SubmitSearch,
            status: 503,
        };
        assert_eq!(err.kind(), ErrorKind::NetworkError);

        assert_eq!(LookupError::NotFound.kind(), ErrorKind::NotFoundError);

        let err: LookupError = TransportError::Session("tls backend".to_string()).into();
        assert_eq!(err.kind(), ErrorKind::UnknownError);

        let err = LookupError::Internal("bad selector".to_string());
        assert_eq!(err.kind(), ErrorKind::UnknownError);
    }

    #[test]
    fn test_error_display() {
        let err = LookupError::HttpStatus {
            phase: Phase::FetchTokens,
            status: 500,
        };
        assert_eq!(err.to_string(), "token fetch (GET) returned HTTP 500");

        let err: LookupError = ValidationError::InvalidFormat.into();
        assert_eq!(err.to_string(), "National number must be exactly 14 digits.");

        assert_eq!(
            LookupError::NotFound.to_string(),
            "No data found for this national number."
        );
    }
}
