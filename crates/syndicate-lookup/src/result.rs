//! Lookup outcomes.

use crate::error::LookupError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed failure taxonomy surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(clippy::enum_variant_names)]
pub enum ErrorKind {
    /// Malformed or mistyped identifier; never reached the network
    ValidationError,
    /// Timeout, connection failure or non-2xx status on either request
    NetworkError,
    /// Request was well-formed but the registry returned no syndicate
    NotFoundError,
    /// Anything else
    UnknownError,
}

impl ErrorKind {
    /// Every kind, in reporting order.
    pub const ALL: [Self; 4] = [
        Self::ValidationError,
        Self::NetworkError,
        Self::NotFoundError,
        Self::UnknownError,
    ];

    /// Human-readable label used to prefix failure messages.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::ValidationError => "Validation Error",
            Self::NetworkError => "Network Error",
            Self::NotFoundError => "Not Found",
            Self::UnknownError => "Unknown Error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of one lookup.
///
/// `identifier` is always the caller's input, verbatim, so batch callers can
/// reconcile results by key or position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LookupResult {
    /// The registry returned a syndicate for this identifier
    Success {
        /// Identifier as supplied by the caller
        identifier: String,
        /// Trimmed syndicate name
        syndicate_name: String,
    },

    /// The lookup stopped short of a syndicate name
    Failure {
        /// Identifier as supplied by the caller
        identifier: String,
        /// Failure category
        error_kind: ErrorKind,
        /// Human-readable reason
        message: String,
    },
}

impl LookupResult {
    /// Build a success outcome.
    #[must_use]
    pub fn success(identifier: impl Into<String>, syndicate_name: impl Into<String>) -> Self {
        Self::Success {
            identifier: identifier.into(),
            syndicate_name: syndicate_name.into(),
        }
    }

    /// Build a failure outcome from an internal error.
    #[must_use]
    pub fn failure(identifier: impl Into<String>, error: &LookupError) -> Self {
        Self::Failure {
            identifier: identifier.into(),
            error_kind: error.kind(),
            message: error.to_string(),
        }
    }

    /// The caller's identifier.
    #[must_use]
    pub fn identifier(&self) -> &str {
        match self {
            Self::Success { identifier, .. } | Self::Failure { identifier, .. } => identifier,
        }
    }

    /// Check if the outcome is successful
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Syndicate name, if the lookup succeeded.
    #[must_use]
    pub fn syndicate_name(&self) -> Option<&str> {
        match self {
            Self::Success { syndicate_name, .. } => Some(syndicate_name),
            Self::Failure { .. } => None,
        }
    }

    /// Failure category, if the lookup failed.
    #[must_use]
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error_kind, .. } => Some(*error_kind),
        }
    }

    /// Failure message, if the lookup failed.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { message, .. } => Some(message),
        }
    }
}
