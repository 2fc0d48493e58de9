//! HTTP transport seam for the form-replay client.
//!
//! A lookup opens one [`FormSession`], performs its GET and POST through it
//! and drops it. Cookies the page sets on the GET therefore reach the POST and
//! go no further.

use crate::error::{TransportError, TransportResult};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use syndicate_core::LookupConfig;

/// Status and body of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpPage {
    /// HTTP status code
    pub status: u16,
    /// Decoded response body
    pub body: String,
}

impl HttpPage {
    /// Create a page from a status and body.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is 2xx.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Factory for per-lookup HTTP sessions.
///
/// Implementations must be thread-safe (Send + Sync) so one client can serve
/// concurrent lookups.
pub trait FormTransport: Send + Sync {
    /// Open a fresh session scoped to a single lookup.
    ///
    /// # Errors
    /// Returns error if the underlying HTTP client cannot be created.
    fn open_session(&self) -> TransportResult<Box<dyn FormSession>>;
}

/// One lookup's HTTP session.
///
/// Non-2xx statuses are returned as pages, not errors; the client decides how
/// to classify them.
#[async_trait]
pub trait FormSession: Send + Sync {
    /// Issue a GET request.
    async fn get(&self, url: &str) -> TransportResult<HttpPage>;

    /// Issue a POST request with an `application/x-www-form-urlencoded` body.
    ///
    /// Fields are encoded in the given order.
    async fn post_form(&self, url: &str, form: &[(String, String)]) -> TransportResult<HttpPage>;
}

/// Production transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    timeout_secs: u64,
    user_agent: String,
}

impl ReqwestTransport {
    /// Create a transport from the lookup settings.
    #[must_use]
    pub fn new(config: &LookupConfig) -> Self {
        Self {
            timeout_secs: config.timeout_secs,
            user_agent: config.user_agent.clone(),
        }
    }
}

impl FormTransport for ReqwestTransport {
    fn open_session(&self) -> TransportResult<Box<dyn FormSession>> {
        let client = Client::builder()
            .user_agent(self.user_agent.clone())
            .timeout(Duration::from_secs(self.timeout_secs))
            .cookie_store(true)
            .build()
            .map_err(|e| TransportError::Session(e.to_string()))?;

        Ok(Box::new(ReqwestSession {
            client,
            timeout_secs: self.timeout_secs,
        }))
    }
}

struct ReqwestSession {
    client: Client,
    timeout_secs: u64,
}

impl ReqwestSession {
    async fn read(&self, url: &str, response: reqwest::Response) -> TransportResult<HttpPage> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| self.classify(url, &e))?;
        Ok(HttpPage { status, body })
    }

    fn classify(&self, url: &str, err: &reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout {
                url: url.to_string(),
                seconds: self.timeout_secs,
            }
        } else if err.is_connect() {
            TransportError::Connect {
                url: url.to_string(),
                message: err.to_string(),
            }
        } else {
            TransportError::Request {
                url: url.to_string(),
                message: err.to_string(),
            }
        }
    }
}

#[async_trait]
impl FormSession for ReqwestSession {
    async fn get(&self, url: &str) -> TransportResult<HttpPage> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(url, &e))?;
        self.read(url, response).await
    }

    async fn post_form(&self, url: &str, form: &[(String, String)]) -> TransportResult<HttpPage> {
        let response = self
            .client
            .post(url)
            .form(form)
            .send()
            .await
            .map_err(|e| self.classify(url, &e))?;
        self.read(url, response).await
    }
}
