//! Syndicate Core - Foundation crate for the syndicate lookup workspace.
//!
//! This crate provides the shared identifier types, the national identifier
//! validator, error handling and configuration management that the lookup
//! client and the command-line shell depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error type plus validation and configuration errors using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - `NationalId` newtype, raw `LookupRequest` and the validator
//!
//! # Example
//!
//! ```rust
//! use syndicate_core::{LookupRequest, NationalId, ValidationError};
//!
//! let id = NationalId::new("29501011234567").expect("valid identifier");
//! assert_eq!(id.as_str(), "29501011234567");
//!
//! let request = LookupRequest::from(29_501_011_234_567_i64);
//! assert!(matches!(
//!     request.validate(),
//!     Err(ValidationError::WrongType { .. })
//! ));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, BatchConfig, LookupConfig, DEFAULT_ENDPOINT};
pub use error::{ConfigError, ConfigResult, Result, SyndicateError, ValidationError};
pub use types::{LookupRequest, NationalId, NATIONAL_ID_LEN};
