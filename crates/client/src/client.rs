//! Client facade.
//!
//! One [`Client`] owns the credential context, the transport and the
//! connection fetcher; it is cheap to clone handles out of via `Arc` fields
//! and safe to share across tasks.

use std::sync::Arc;

use ledgerlink_domain::{
    Account, AccountParams, ApiError, Attempt, CallbackStage, Connection,
    ConnectionInteractiveParams, ConnectionParams, ConnectionReconnectParams,
    ConnectionRefreshParams, Customer, CustomerParams, Envelope, Provider, ProviderParams,
    RemovedConnection, Result, Transaction, TransactionParams,
};

use crate::callback::parse_callback;
use crate::config::ClientConfig;
use crate::fetcher::{ConnectionFetchDelegate, ConnectionFetcher, PollHandle};
use crate::headers::Credentials;
use crate::routes::Route;
use crate::transport::{PinningDisabled, Transport, TrustEvaluator};

/// Entry point of the SDK.
#[derive(Debug)]
pub struct Client {
    transport: Arc<Transport>,
    credentials: Arc<Credentials>,
    fetcher: ConnectionFetcher,
}

impl Client {
    /// Build a client with the default trust evaluator (no pinning).
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_trust(config, Arc::new(PinningDisabled))
    }

    /// Build a client with a custom trust precondition. Every request,
    /// including each poll of a running attempt, evaluates it first.
    pub fn with_trust(config: ClientConfig, trust: Arc<dyn TrustEvaluator>) -> Result<Self> {
        let credentials = Arc::new(Credentials::default());
        let transport = Arc::new(Transport::new(&config, Arc::clone(&credentials), trust)?);
        let fetcher = ConnectionFetcher::new(Arc::clone(&transport), config.poll_interval);
        Ok(Self { transport, credentials, fetcher })
    }

    /// Link the application id and secret. Takes effect for requests issued
    /// after the call; in-flight requests keep the headers they started with.
    pub fn set_app_credentials(&self, app_id: &str, app_secret: &str) {
        self.credentials.set_app(app_id, app_secret);
    }

    /// Link the customer secret used by connection-scoped calls.
    pub fn set_customer_secret(&self, customer_secret: &str) {
        self.credentials.set_customer_secret(customer_secret);
    }

    // --- Providers ---

    /// Fetch one page of providers.
    pub async fn providers(
        &self,
        params: Option<&ProviderParams>,
    ) -> Result<Envelope<Vec<Provider>>> {
        self.transport.send(&Route::providers_list(params)?).await
    }

    /// Fetch every page of providers, following the pagination cursor.
    pub async fn all_providers(
        &self,
        params: Option<&ProviderParams>,
    ) -> Result<Envelope<Vec<Provider>>> {
        self.transport.fetch_all(&Route::providers_list(params)?).await
    }

    /// Fetch a single provider by code.
    pub async fn provider(&self, code: &str) -> Result<Envelope<Provider>> {
        self.transport.send(&Route::provider_show(code)).await
    }

    // --- Customers ---

    /// Register a customer; the returned secret scopes all of the
    /// customer's connections.
    pub async fn create_customer(&self, params: &CustomerParams) -> Result<Envelope<Customer>> {
        self.transport.send(&Route::customer_create(params)?).await
    }

    // --- Connections ---

    /// Fetch the current state of a connection.
    pub async fn connection(&self, secret: &str) -> Result<Envelope<Connection>> {
        self.transport.send(&Route::connection_show(secret)).await
    }

    /// Remove a connection and all of its fetched data.
    pub async fn remove_connection(&self, secret: &str) -> Result<Envelope<RemovedConnection>> {
        self.transport.send(&Route::connection_remove(secret)).await
    }

    /// Create a connection and poll its first attempt until it needs input
    /// or finishes. Outcomes arrive on the delegate.
    pub fn create_connection(
        &self,
        params: &ConnectionParams,
        delegate: Arc<dyn ConnectionFetchDelegate>,
    ) -> Result<PollHandle> {
        Ok(self.fetcher.start(Route::connection_create(params)?, delegate))
    }

    /// Reconnect an existing connection with fresh credentials and poll the
    /// resulting attempt.
    pub fn reconnect_connection(
        &self,
        secret: &str,
        params: &ConnectionReconnectParams,
        delegate: Arc<dyn ConnectionFetchDelegate>,
    ) -> Result<PollHandle> {
        Ok(self.fetcher.start(Route::connection_reconnect(secret, params)?, delegate))
    }

    /// Trigger a refresh of a connection's data and poll the attempt.
    pub fn refresh_connection(
        &self,
        secret: &str,
        params: Option<&ConnectionRefreshParams>,
        delegate: Arc<dyn ConnectionFetchDelegate>,
    ) -> Result<PollHandle> {
        Ok(self.fetcher.start(Route::connection_refresh(secret, params)?, delegate))
    }

    /// Answer an interactive stage with the requested credentials and poll
    /// the attempt onward.
    pub fn submit_interactive_credentials(
        &self,
        secret: &str,
        params: &ConnectionInteractiveParams,
        delegate: Arc<dyn ConnectionFetchDelegate>,
    ) -> Result<PollHandle> {
        Ok(self.fetcher.start(Route::connection_interactive(secret, params)?, delegate))
    }

    /// Poll an attempt that is already running on the server, typically
    /// after an OAuth redirect handed back the connection secret. The first
    /// poll is issued immediately.
    pub fn handle_oauth_connection(
        &self,
        secret: &str,
        delegate: Arc<dyn ConnectionFetchDelegate>,
    ) -> PollHandle {
        self.fetcher.resume(secret, delegate)
    }

    /// Act on a connect-flow reentry URL. URLs that are not callbacks
    /// return `Ok(None)` untouched. A `fetching` or `success` stage resumes
    /// polling with the carried secret and returns the handle; an `error`
    /// stage reports `failed_to_fetch` immediately.
    pub async fn handle_callback(
        &self,
        url: &str,
        delegate: Arc<dyn ConnectionFetchDelegate>,
    ) -> Result<Option<PollHandle>> {
        let Some(callback) = parse_callback(url)? else {
            return Ok(None);
        };
        match callback.stage {
            CallbackStage::Fetching | CallbackStage::Success => {
                let secret = callback.secret.ok_or_else(|| {
                    ApiError::Decoding("callback carries no connection secret".into())
                })?;
                Ok(Some(self.fetcher.resume(&secret, delegate)))
            }
            CallbackStage::Error => {
                delegate
                    .failed_to_fetch(None, "the connect flow reported an error".into())
                    .await;
                Ok(None)
            }
        }
    }

    // --- Attempts ---

    /// Fetch one page of the connection's attempts.
    pub async fn attempts(&self, secret: &str) -> Result<Envelope<Vec<Attempt>>> {
        self.transport.send(&Route::attempts_list(secret)).await
    }

    /// Fetch every attempt of the connection.
    pub async fn all_attempts(&self, secret: &str) -> Result<Envelope<Vec<Attempt>>> {
        self.transport.fetch_all(&Route::attempts_list(secret)).await
    }

    /// Fetch a single attempt by id.
    pub async fn attempt(&self, id: &str, secret: &str) -> Result<Envelope<Attempt>> {
        self.transport.send(&Route::attempt_show(id, secret)).await
    }

    // --- Accounts ---

    /// Fetch one page of the connection's accounts.
    pub async fn accounts(
        &self,
        secret: &str,
        params: Option<&AccountParams>,
    ) -> Result<Envelope<Vec<Account>>> {
        self.transport.send(&Route::accounts_list(secret, params)?).await
    }

    /// Fetch every account of the connection.
    pub async fn all_accounts(
        &self,
        secret: &str,
        params: Option<&AccountParams>,
    ) -> Result<Envelope<Vec<Account>>> {
        self.transport.fetch_all(&Route::accounts_list(secret, params)?).await
    }

    // --- Transactions ---

    /// Fetch one page of transactions for the connection.
    pub async fn transactions(
        &self,
        secret: &str,
        params: Option<&TransactionParams>,
    ) -> Result<Envelope<Vec<Transaction>>> {
        self.transport.send(&Route::transactions_list(secret, params)?).await
    }

    /// Fetch every transaction matching the filters, following the
    /// pagination cursor across pages.
    pub async fn all_transactions(
        &self,
        secret: &str,
        params: Option<&TransactionParams>,
    ) -> Result<Envelope<Vec<Transaction>>> {
        self.transport.fetch_all(&Route::transactions_list(secret, params)?).await
    }
}
