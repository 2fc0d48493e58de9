//! Syndicate Lookup - Form-replay client for the engineers' syndicate registry.
//!
//! The registry exposes a single ASP.NET search page. A lookup replays the
//! page's postback: GET the page to harvest its hidden view-state tokens, POST
//! the search form with the national identifier, then read the syndicate name
//! out of the response.
//!
//! # Features
//!
//! - Identifier validation before any network activity
//! - Fresh token harvest and a fresh HTTP session on every lookup
//! - Closed failure taxonomy: validation, network, not found, unknown
//! - Pluggable [`FormTransport`] for testing without a network
//!
//! # Example
//!
//! ```rust,no_run
//! use syndicate_core::LookupConfig;
//! use syndicate_lookup::SyndicateClient;
//!
//! # async fn run() {
//! let client = SyndicateClient::new(&LookupConfig::default());
//! let result = client.lookup("29501011234567").await;
//!
//! match result.syndicate_name() {
//!     Some(name) => println!("{}: {name}", result.identifier()),
//!     None => println!("{}: {:?}", result.identifier(), result.message()),
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod client;
pub mod error;
pub mod extract;
pub mod form;
pub mod result;
pub mod summary;
pub mod transport;

// Re-export commonly used types
pub use client::SyndicateClient;
pub use error::{LookupError, Phase, TransportError, TransportResult};
pub use extract::{extract_syndicate, RESULT_ELEMENT_ID};
pub use form::{FormTokens, TOKEN_FIELDS};
pub use result::{ErrorKind, LookupResult};
pub use summary::LookupSummary;
pub use transport::{FormSession, FormTransport, HttpPage, ReqwestTransport};
