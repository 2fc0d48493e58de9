//! Form-replay client.

use crate::error::{LookupError, Phase, Result};
use crate::extract::extract_syndicate;
use crate::form::FormTokens;
use crate::result::LookupResult;
use crate::transport::{FormTransport, HttpPage, ReqwestTransport};
use std::sync::Arc;
use syndicate_core::{LookupConfig, LookupRequest};
use tracing::{debug, info, warn};

/// Looks up the syndicate registered for a national identifier.
///
/// Each call validates the identifier, fetches fresh form tokens, submits the
/// search and extracts the result. No state survives between calls, so one
/// client can be shared across tasks.
#[derive(Clone)]
pub struct SyndicateClient {
    endpoint: String,
    transport: Arc<dyn FormTransport>,
}

impl SyndicateClient {
    /// Create a client that talks to the configured endpoint over HTTP.
    #[must_use]
    pub fn new(config: &LookupConfig) -> Self {
        Self::with_transport(
            config.endpoint.clone(),
            Arc::new(ReqwestTransport::new(config)),
        )
    }

    /// Create a client over a custom transport.
    pub fn with_transport(endpoint: impl Into<String>, transport: Arc<dyn FormTransport>) -> Self {
        Self {
            endpoint: endpoint.into(),
            transport,
        }
    }

    /// The search page URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Look up one identifier.
    ///
    /// Never fails: every error is folded into [`LookupResult::Failure`], and
    /// the result's identifier is always the caller's input.
    pub async fn lookup(&self, request: impl Into<LookupRequest>) -> LookupResult {
        let request = request.into();
        let identifier = request.identifier();

        match self.run(&request).await {
            Ok(syndicate_name) => {
                info!("Lookup succeeded");
                debug!(identifier = %identifier, syndicate = %syndicate_name, "Lookup result");
                LookupResult::success(identifier, syndicate_name)
            }
            Err(e) => {
                warn!(kind = %e.kind(), "Lookup failed: {}", e);
                LookupResult::failure(identifier, &e)
            }
        }
    }

    /// Blocking variant of [`lookup`](Self::lookup) for synchronous callers.
    ///
    /// Drives the lookup on a private current-thread runtime. Calling it from
    /// inside an async runtime yields an `UnknownError` failure instead of
    /// blocking the executor.
    pub fn lookup_blocking(&self, request: impl Into<LookupRequest>) -> LookupResult {
        let request = request.into();

        if tokio::runtime::Handle::try_current().is_ok() {
            let err = LookupError::Internal(
                "lookup_blocking called from within an async runtime; use lookup instead"
                    .to_string(),
            );
            return LookupResult::failure(request.identifier(), &err);
        }

        match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime.block_on(self.lookup(request)),
            Err(e) => {
                let err = LookupError::Internal(format!("failed to start runtime: {e}"));
                LookupResult::failure(request.identifier(), &err)
            }
        }
    }

    async fn run(&self, request: &LookupRequest) -> Result<String> {
        let national_id = request.validate()?;
        let session = self.transport.open_session()?;

        debug!("Fetching form tokens from {}", self.endpoint);
        let page = session.get(&self.endpoint).await?;
        ensure_success(Phase::FetchTokens, &page)?;
        let tokens = FormTokens::harvest(&page.body)?;

        debug!("Submitting search form");
        let payload = tokens.search_payload(&national_id);
        let page = session.post_form(&self.endpoint, &payload).await?;
        ensure_success(Phase::SubmitSearch, &page)?;

        extract_syndicate(&page.body)
    }
}

fn ensure_success(phase: Phase, page: &HttpPage) -> Result<()> {
    if page.is_success() {
        Ok(())
    } else {
        Err(LookupError::HttpStatus {
            phase,
            status: page.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{TransportError, TransportResult};
    use crate::result::ErrorKind;
    use crate::transport::FormSession;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Transport whose sessions cannot be opened.
    #[derive(Default)]
    struct BrokenTransport {
        opened: AtomicUsize,
    }

    impl FormTransport for BrokenTransport {
        fn open_session(&self) -> TransportResult<Box<dyn FormSession>> {
            self.opened.fetch_add(1, Ordering::SeqCst);
            Err(TransportError::Session("no TLS backend".to_string()))
        }
    }

    fn client(transport: Arc<BrokenTransport>) -> SyndicateClient {
        SyndicateClient::with_transport("http://localhost/lastpaid.aspx", transport)
    }

    #[test]
    fn test_new_uses_configured_endpoint() {
        let client = SyndicateClient::new(&LookupConfig::default());
        assert_eq!(client.endpoint(), syndicate_core::DEFAULT_ENDPOINT);
    }

    #[tokio::test]
    async fn test_validation_happens_before_session() {
        let transport = Arc::new(BrokenTransport::default());
        let result = client(transport.clone()).lookup("not-an-id").await;

        assert_eq!(result.error_kind(), Some(ErrorKind::ValidationError));
        assert_eq!(transport.opened.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_session_failure_is_unknown_error() {
        let transport = Arc::new(BrokenTransport::default());
        let result = client(transport.clone()).lookup("29501011234567").await;

        assert_eq!(result.identifier(), "29501011234567");
        assert_eq!(result.error_kind(), Some(ErrorKind::UnknownError));
        assert_eq!(transport.opened.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_lookup_blocking_outside_runtime() {
        let transport = Arc::new(BrokenTransport::default());
        let result = client(transport).lookup_blocking(29_501_011_234_567_i64);

        assert_eq!(result.identifier(), "29501011234567");
        assert_eq!(result.error_kind(), Some(ErrorKind::ValidationError));
        assert!(result
            .message()
            .is_some_and(|m| m.contains("must be a string")));
    }

    #[tokio::test]
    async fn test_lookup_blocking_inside_runtime_does_not_panic() {
        let transport = Arc::new(BrokenTransport::default());
        let result = client(transport.clone()).lookup_blocking("29501011234567");

        assert_eq!(result.error_kind(), Some(ErrorKind::UnknownError));
        assert_eq!(transport.opened.load(Ordering::SeqCst), 0);
    }
}
