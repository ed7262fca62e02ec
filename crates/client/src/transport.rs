//! Single-shot HTTP transport and cursor pagination.
//!
//! Every dispatch runs the trust precondition first, snapshots the
//! credential headers, and performs exactly one HTTP exchange. Status codes
//! are not inspected: the API reports business failures inside the payload,
//! which [`decode`](crate::decode) probes for on every response.

use std::sync::Arc;

use ledgerlink_domain::{ApiError, Envelope, Result};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::decode::decode_response;
use crate::headers::Credentials;
use crate::routes::{Route, RouteParams};

/// Precondition gate evaluated before every dispatch. A failing evaluation
/// aborts the request without any network traffic.
#[async_trait::async_trait]
pub trait TrustEvaluator: Send + Sync {
    async fn check_trust(&self) -> Result<()>;
}

/// Default evaluator: no pinning, every dispatch proceeds.
#[derive(Debug, Default)]
pub struct PinningDisabled;

#[async_trait::async_trait]
impl TrustEvaluator for PinningDisabled {
    async fn check_trust(&self) -> Result<()> {
        Ok(())
    }
}

/// HTTP transport bound to one API root.
pub struct Transport {
    http: reqwest::Client,
    base_url: Url,
    credentials: Arc<Credentials>,
    trust: Arc<dyn TrustEvaluator>,
    max_pages: usize,
}

impl Transport {
    pub(crate) fn new(
        config: &ClientConfig,
        credentials: Arc<Credentials>,
        trust: Arc<dyn TrustEvaluator>,
    ) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|err| ApiError::Encoding(format!("invalid base URL: {err}")))?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| ApiError::Transport(err.to_string()))?;

        Ok(Self { http, base_url, credentials, trust, max_pages: config.max_pages })
    }

    /// Issue one request and decode one envelope.
    pub(crate) async fn send<T>(&self, route: &Route) -> Result<Envelope<T>>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(&route.path)?;
        self.execute(url, route, true).await
    }

    /// Follow the pagination cursor until the server stops advertising a
    /// next page, concatenating page data in arrival order. Aborts with
    /// [`ApiError::PaginationLimitExceeded`] once the page cap is reached,
    /// so a cyclic cursor cannot loop forever.
    pub(crate) async fn fetch_all<T>(&self, route: &Route) -> Result<Envelope<Vec<T>>>
    where
        T: DeserializeOwned,
    {
        let mut collected = Vec::new();
        let mut cursor: Option<String> = None;

        for page in 0..self.max_pages {
            let (url, with_params) = match &cursor {
                None => (self.endpoint(&route.path)?, true),
                Some(next_page) => (self.cursor_url(next_page)?, false),
            };

            let envelope: Envelope<Vec<T>> = self.execute(url, route, with_params).await?;
            collected.extend(envelope.data);

            match envelope.meta {
                Some(meta) if meta.has_next_page() => {
                    debug!(page, next_id = meta.next_id.as_deref(), "following pagination cursor");
                    cursor = meta.next_page;
                }
                meta => return Ok(Envelope { data: collected, meta }),
            }
        }

        warn!(max_pages = self.max_pages, path = %route.path, "pagination cap reached");
        Err(ApiError::PaginationLimitExceeded(self.max_pages))
    }

    async fn execute<T>(&self, url: Url, route: &Route, with_params: bool) -> Result<Envelope<T>>
    where
        T: DeserializeOwned,
    {
        self.trust.check_trust().await?;

        let headers = self.credentials.snapshot(route.connection_secret.as_deref())?;
        let mut request = self.http.request(route.method.clone(), url.clone()).headers(headers);

        if with_params {
            match &route.params {
                RouteParams::None => {}
                RouteParams::Query(pairs) => request = request.query(pairs),
                RouteParams::Body(bytes) => request = request.body(bytes.clone()),
            }
        }

        debug!(method = %route.method, url = %url, "dispatching request");
        match request.send().await {
            Ok(response) => {
                let bytes = response
                    .bytes()
                    .await
                    .map_err(|err| ApiError::Transport(err.to_string()))?;
                let bytes = (!bytes.is_empty()).then_some(bytes);
                decode_response(bytes.as_deref(), None)
            }
            Err(err) => {
                warn!(method = %route.method, url = %url, error = %err, "request failed");
                decode_response(None, Some(ApiError::Transport(err.to_string())))
            }
        }
    }

    /// Join a route path onto the API root. The root's path is preserved,
    /// so "providers" lands under ".../api/v1/providers".
    fn endpoint(&self, path: &str) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}/{path}"))
            .map_err(|err| ApiError::Encoding(format!("invalid endpoint `{path}`: {err}")))
    }

    /// Resolve a pagination cursor against the API root. Cursors arrive as
    /// absolute paths (with their query string intact) and replace the
    /// root's path entirely.
    fn cursor_url(&self, next_page: &str) -> Result<Url> {
        self.base_url
            .join(next_page)
            .map_err(|err| ApiError::Decoding(format!("invalid pagination cursor: {err}")))
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url.as_str())
            .field("max_pages", &self.max_pages)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(base_url: &str) -> Transport {
        let config = ClientConfig { base_url: base_url.to_string(), ..Default::default() };
        Transport::new(&config, Arc::new(Credentials::default()), Arc::new(PinningDisabled))
            .expect("valid transport")
    }

    #[test]
    fn endpoints_extend_the_api_root_path() {
        let transport = transport("https://api.ledgerlink.com/api/v1");
        let url = transport.endpoint("connection/refresh").unwrap();
        assert_eq!(url.as_str(), "https://api.ledgerlink.com/api/v1/connection/refresh");
    }

    #[test]
    fn trailing_slash_on_the_root_is_tolerated() {
        let transport = transport("https://api.ledgerlink.com/api/v1/");
        let url = transport.endpoint("providers").unwrap();
        assert_eq!(url.as_str(), "https://api.ledgerlink.com/api/v1/providers");
    }

    #[test]
    fn cursors_replace_the_root_path() {
        let transport = transport("https://api.ledgerlink.com/api/v1");
        let url = transport.cursor_url("/api/v1/transactions?from_id=99").unwrap();
        assert_eq!(url.as_str(), "https://api.ledgerlink.com/api/v1/transactions?from_id=99");
    }

    #[test]
    fn invalid_base_urls_are_rejected_up_front() {
        let config = ClientConfig { base_url: "not a url".into(), ..Default::default() };
        let result =
            Transport::new(&config, Arc::new(Credentials::default()), Arc::new(PinningDisabled));
        assert!(matches!(result, Err(ApiError::Encoding(_))));
    }
}
