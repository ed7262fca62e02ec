//! Typed request parameter objects.
//!
//! Every field carries its explicit wire name through serde; absent optional
//! fields are omitted rather than sent as null. Body-encoded types serialize
//! dates through the fixed UTC date-time format, query-encoded types hold
//! only scalar fields.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::dates;

/// Parameters for creating a connection (body encoded).
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConnectionParams {
    pub country_code: String,
    pub provider_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_scopes: Option<Vec<String>>,
    #[serde(with = "dates::flexible_opt", skip_serializing_if = "Option::is_none")]
    pub from_date: Option<DateTime<Utc>>,
    #[serde(with = "dates::flexible_opt", skip_serializing_if = "Option::is_none")]
    pub to_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_refresh: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categorize: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_credentials: Option<bool>,
}

/// Parameters for reconnecting an existing connection (body encoded).
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConnectionReconnectParams {
    pub credentials: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_scopes: Option<Vec<String>>,
    #[serde(with = "dates::flexible_opt", skip_serializing_if = "Option::is_none")]
    pub from_date: Option<DateTime<Utc>>,
    #[serde(with = "dates::flexible_opt", skip_serializing_if = "Option::is_none")]
    pub to_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_refresh: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_credentials: Option<bool>,
}

/// Parameters for refreshing a connection (body encoded). All fields
/// optional; `None` everywhere requests a plain refresh.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConnectionRefreshParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_scopes: Option<Vec<String>>,
    #[serde(with = "dates::flexible_opt", skip_serializing_if = "Option::is_none")]
    pub from_date: Option<DateTime<Utc>>,
    #[serde(with = "dates::flexible_opt", skip_serializing_if = "Option::is_none")]
    pub to_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_refresh: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categorize: Option<bool>,
}

/// Interactive credentials submitted while an attempt waits in the
/// interactive stage (body encoded).
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConnectionInteractiveParams {
    pub credentials: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_scopes: Option<Vec<String>>,
}

/// Parameters for creating a customer (body encoded).
#[derive(Debug, Clone, Serialize)]
pub struct CustomerParams {
    pub identifier: String,
}

/// Filters for listing providers (query encoded).
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProviderParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_fake_providers: Option<bool>,
}

/// Filters for listing accounts (query encoded).
#[derive(Debug, Clone, Default, Serialize)]
pub struct AccountParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_id: Option<u64>,
}

/// Filters for listing transactions (query encoded).
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransactionParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_id: Option<u64>,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn absent_optionals_are_omitted_from_bodies() {
        let params = ConnectionParams {
            country_code: "XF".into(),
            provider_code: "fakebank_simple_xf".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&params).expect("encodes");
        let object = value.as_object().expect("object");
        assert_eq!(object.len(), 2);
        assert!(!object.contains_key("credentials"));
    }

    #[test]
    fn dates_encode_with_seconds_precision() {
        let params = ConnectionRefreshParams {
            from_date: Utc.with_ymd_and_hms(2020, 10, 16, 14, 31, 21).single(),
            ..Default::default()
        };
        let value = serde_json::to_value(&params).expect("encodes");
        assert_eq!(value["from_date"], "2020-10-16T14:31:21Z");
    }
}
