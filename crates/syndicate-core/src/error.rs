//! Core error types for the syndicate lookup workspace.
//!
//! Identifier validation and configuration loading are the two failure
//! sources owned by this crate. The lookup client folds [`ValidationError`]
//! into its own failure taxonomy; everything else surfaces through
//! [`SyndicateError`].

use thiserror::Error;

/// Central error type for operations outside a single lookup.
///
/// Each variant wraps the error of one subsystem so callers can propagate
/// with `?` across module boundaries.
#[derive(Error, Debug)]
pub enum SyndicateError {
    /// Configuration errors (file loading, parsing, validation)
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Identifier validation errors
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons an identifier is rejected before any network activity.
///
/// The two variants are reported differently by batch callers: a wrong type
/// usually means the source column was read as numbers, a bad format means the
/// row itself is malformed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The raw value was not a string (number, boolean, null, ...)
    #[error("National number must be a string.")]
    WrongType {
        /// JSON type name of the rejected value
        found: &'static str,
    },

    /// The string is not exactly 14 ASCII digits
    #[error("National number must be exactly 14 digits.")]
    InvalidFormat,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (XDG base directories not available)")]
    NoConfigDir,

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize config
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// I/O error reading/writing config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Result type alias using `SyndicateError`.
pub type Result<T> = std::result::Result<T, SyndicateError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
