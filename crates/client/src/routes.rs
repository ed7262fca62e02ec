//! Route table.
//!
//! Each constructor captures everything a dispatch needs: HTTP method, path
//! relative to the API root, the per-call connection secret if the resource
//! requires one, and the already-encoded parameters. Encoding happens here
//! so a bad parameter set fails before any socket is touched.

use ledgerlink_domain::{
    AccountParams, ConnectionInteractiveParams, ConnectionParams, ConnectionReconnectParams,
    ConnectionRefreshParams, CustomerParams, ProviderParams, Result, TransactionParams,
};
use reqwest::Method;

use crate::encoding::{encode_body, encode_query};

#[derive(Debug, Clone)]
pub(crate) enum RouteParams {
    None,
    Query(Vec<(String, String)>),
    Body(Vec<u8>),
}

#[derive(Debug, Clone)]
pub(crate) struct Route {
    pub method: Method,
    pub path: String,
    pub connection_secret: Option<String>,
    pub params: RouteParams,
}

impl Route {
    fn new(method: Method, path: &str) -> Self {
        Self { method, path: path.to_string(), connection_secret: None, params: RouteParams::None }
    }

    fn with_secret(mut self, secret: &str) -> Self {
        self.connection_secret = Some(secret.to_string());
        self
    }

    fn with_query<T: serde::Serialize>(mut self, params: Option<&T>) -> Result<Self> {
        if let Some(params) = params {
            self.params = RouteParams::Query(encode_query(params)?);
        }
        Ok(self)
    }

    fn with_body<T: serde::Serialize>(mut self, params: &T) -> Result<Self> {
        self.params = RouteParams::Body(encode_body(params)?);
        Ok(self)
    }

    pub fn providers_list(params: Option<&ProviderParams>) -> Result<Self> {
        Self::new(Method::GET, "providers").with_query(params)
    }

    pub fn provider_show(code: &str) -> Self {
        Self::new(Method::GET, &format!("providers/{code}"))
    }

    pub fn customer_create(params: &CustomerParams) -> Result<Self> {
        Self::new(Method::POST, "customers").with_body(params)
    }

    pub fn connection_show(secret: &str) -> Self {
        Self::new(Method::GET, "connection").with_secret(secret)
    }

    pub fn connection_create(params: &ConnectionParams) -> Result<Self> {
        Self::new(Method::POST, "connection").with_body(params)
    }

    pub fn connection_reconnect(secret: &str, params: &ConnectionReconnectParams) -> Result<Self> {
        Self::new(Method::PUT, "connection/reconnect").with_secret(secret).with_body(params)
    }

    pub fn connection_interactive(
        secret: &str,
        params: &ConnectionInteractiveParams,
    ) -> Result<Self> {
        Self::new(Method::PUT, "connection/interactive").with_secret(secret).with_body(params)
    }

    pub fn connection_refresh(
        secret: &str,
        params: Option<&ConnectionRefreshParams>,
    ) -> Result<Self> {
        let route = Self::new(Method::PUT, "connection/refresh").with_secret(secret);
        match params {
            Some(params) => route.with_body(params),
            None => Ok(route),
        }
    }

    pub fn connection_remove(secret: &str) -> Self {
        Self::new(Method::DELETE, "connection").with_secret(secret)
    }

    pub fn attempts_list(secret: &str) -> Self {
        Self::new(Method::GET, "attempts").with_secret(secret)
    }

    pub fn attempt_show(id: &str, secret: &str) -> Self {
        Self::new(Method::GET, &format!("attempts/{id}")).with_secret(secret)
    }

    pub fn accounts_list(secret: &str, params: Option<&AccountParams>) -> Result<Self> {
        Self::new(Method::GET, "accounts").with_secret(secret).with_query(params)
    }

    pub fn transactions_list(secret: &str, params: Option<&TransactionParams>) -> Result<Self> {
        Self::new(Method::GET, "transactions").with_secret(secret).with_query(params)
    }
}
