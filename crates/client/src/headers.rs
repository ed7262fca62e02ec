//! Credential headers merged into every outgoing request.
//!
//! The client owns one `Credentials` value; setters take effect for
//! subsequently issued requests only, because every dispatch works from a
//! snapshot taken at request-build time. The connection secret is attached
//! per call, never stored here, so it cannot leak across unrelated requests.

use ledgerlink_domain::{ApiError, Result};
use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};

/* HTTP header names (lowercase, per HeaderName requirements) */
pub(crate) mod keys {
    pub const APP_ID: &str = "app-id";
    pub const SECRET: &str = "secret";
    pub const CUSTOMER_SECRET: &str = "customer-secret";
    pub const CONNECTION_SECRET: &str = "connection-secret";
}

#[derive(Debug, Default, Clone)]
struct CredentialState {
    app_id: Option<String>,
    app_secret: Option<String>,
    customer_secret: Option<String>,
}

/// Session-wide credential context.
#[derive(Debug, Default)]
pub(crate) struct Credentials {
    state: RwLock<CredentialState>,
}

impl Credentials {
    /// Link the application id and secret; all subsequent requests carry
    /// the app-related headers.
    pub fn set_app(&self, app_id: &str, app_secret: &str) {
        let mut state = self.state.write();
        state.app_id = Some(app_id.to_string());
        state.app_secret = Some(app_secret.to_string());
    }

    /// Link the customer secret for connection-related calls.
    pub fn set_customer_secret(&self, customer_secret: &str) {
        self.state.write().customer_secret = Some(customer_secret.to_string());
    }

    /// Take an immutable snapshot of the headers for one request. The
    /// connection secret is included only when the route names one.
    pub fn snapshot(&self, connection_secret: Option<&str>) -> Result<HeaderMap> {
        let state = self.state.read().clone();

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(app_id) = &state.app_id {
            insert(&mut headers, keys::APP_ID, app_id)?;
        }
        if let Some(app_secret) = &state.app_secret {
            insert(&mut headers, keys::SECRET, app_secret)?;
        }
        if let Some(customer_secret) = &state.customer_secret {
            insert(&mut headers, keys::CUSTOMER_SECRET, customer_secret)?;
        }
        if let Some(secret) = connection_secret {
            insert(&mut headers, keys::CONNECTION_SECRET, secret)?;
        }

        Ok(headers)
    }
}

fn insert(headers: &mut HeaderMap, name: &'static str, value: &str) -> Result<()> {
    let value = HeaderValue::from_str(value)
        .map_err(|_| ApiError::Encoding(format!("invalid header value for `{name}`")))?;
    headers.insert(HeaderName::from_static(name), value);
    Ok(())
}
