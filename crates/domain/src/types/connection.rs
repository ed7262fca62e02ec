//! Connections, attempts and stages.
//!
//! A connection is the aggregator's persisted link to one bank account
//! holder. Every create/reconnect/refresh operation runs as an attempt, and
//! each attempt advances through server-reported stages. The poller drives
//! its state machine off [`Connection::stage_name`].

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dates;

/// Name of the stage an attempt is currently in.
///
/// The server may introduce stage names at any time, so everything that is
/// not one of the two names the SDK acts on is carried verbatim in
/// [`StageName::Other`] and treated as "still in progress".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StageName {
    /// The attempt is waiting for user-supplied interactive credentials.
    Interactive,
    /// The attempt reached its terminal stage, successfully or not.
    Finish,
    /// Any other stage reported by the server (`start`, `connect`,
    /// `fetch_accounts`, ...).
    Other(String),
}

impl From<String> for StageName {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "interactive" => Self::Interactive,
            "finish" => Self::Finish,
            _ => Self::Other(raw),
        }
    }
}

impl From<StageName> for String {
    fn from(name: StageName) -> Self {
        match name {
            StageName::Interactive => "interactive".into(),
            StageName::Finish => "finish".into(),
            StageName::Other(raw) => raw,
        }
    }
}

impl StageName {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Interactive => "interactive",
            Self::Finish => "finish",
            Self::Other(raw) => raw,
        }
    }
}

/// One reported step within an attempt.
#[derive(Debug, Clone, Deserialize)]
pub struct Stage {
    pub id: String,
    pub name: StageName,
    #[serde(with = "dates::flexible")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "dates::flexible")]
    pub updated_at: DateTime<Utc>,
    /// Field names the user must supply when the stage is interactive.
    #[serde(default)]
    pub interactive_fields_names: Option<Vec<String>>,
    /// Optional HTML the bank wants rendered for the interactive step.
    #[serde(default)]
    pub interactive_html: Option<String>,
}

/// One aggregation run for a connection. Immutable once `success_at` or
/// `fail_at` is set.
#[derive(Debug, Clone, Deserialize)]
pub struct Attempt {
    pub id: String,
    #[serde(with = "dates::flexible")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "dates::flexible")]
    pub updated_at: DateTime<Utc>,
    #[serde(default, with = "dates::flexible_opt")]
    pub success_at: Option<DateTime<Utc>>,
    #[serde(default, with = "dates::flexible_opt")]
    pub fail_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fail_error_class: Option<String>,
    #[serde(default)]
    pub fail_message: Option<String>,
    #[serde(default)]
    pub finished: bool,
    #[serde(default)]
    pub interactive: bool,
    #[serde(default)]
    pub partial: bool,
    #[serde(default)]
    pub custom_fields: Option<HashMap<String, String>>,
    #[serde(default)]
    pub last_stage: Option<Stage>,
    #[serde(default)]
    pub stages: Option<Vec<Stage>>,
}

/// An aggregated bank connection. The `secret` scopes every subsequent call
/// for this resource and must be persisted by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct Connection {
    pub id: String,
    pub secret: String,
    pub provider_id: String,
    pub provider_code: String,
    pub provider_name: String,
    pub country_code: String,
    pub status: String,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(with = "dates::flexible")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "dates::flexible")]
    pub updated_at: DateTime<Utc>,
    #[serde(default, with = "dates::flexible_opt")]
    pub last_success_at: Option<DateTime<Utc>>,
    #[serde(default, with = "dates::flexible_opt")]
    pub next_refresh_possible_at: Option<DateTime<Utc>>,
    pub last_attempt: Attempt,
}

impl Connection {
    /// The stage the last attempt currently sits in. Connections that have
    /// not reported a stage yet read as `Other("unknown")`.
    pub fn stage_name(&self) -> StageName {
        self.last_attempt
            .last_stage
            .as_ref()
            .map(|stage| stage.name.clone())
            .unwrap_or_else(|| StageName::Other("unknown".into()))
    }

    /// Failure message of the last attempt, if it failed.
    pub fn fail_message(&self) -> Option<&str> {
        self.last_attempt.fail_message.as_deref()
    }
}

/// Acknowledgement returned when a connection is removed.
#[derive(Debug, Clone, Deserialize)]
pub struct RemovedConnection {
    pub id: String,
    pub removed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connection_json(last_stage: Option<&str>, fail_message: Option<&str>) -> serde_json::Value {
        let mut attempt = serde_json::json!({
            "id": "1001",
            "created_at": "2020-10-16T14:31:21Z",
            "updated_at": "2020-10-16T14:31:30Z",
            "finished": false,
        });
        if let Some(name) = last_stage {
            attempt["last_stage"] = serde_json::json!({
                "id": "2001",
                "name": name,
                "created_at": "2020-10-16T14:31:25Z",
                "updated_at": "2020-10-16T14:31:25Z",
            });
        }
        if let Some(message) = fail_message {
            attempt["fail_message"] = serde_json::json!(message);
        }
        serde_json::json!({
            "id": "111",
            "secret": "conn-secret",
            "provider_id": "99",
            "provider_code": "fakebank_simple_xf",
            "provider_name": "Fakebank Simple",
            "country_code": "XF",
            "status": "active",
            "created_at": "2020-10-16T14:31:21Z",
            "updated_at": "2020-10-16T14:31:30Z",
            "last_attempt": attempt,
        })
    }

    #[test]
    fn stage_name_maps_known_tags() {
        assert_eq!(StageName::from("interactive".to_string()), StageName::Interactive);
        assert_eq!(StageName::from("finish".to_string()), StageName::Finish);
        assert_eq!(
            StageName::from("fetch_accounts".to_string()),
            StageName::Other("fetch_accounts".into())
        );
    }

    #[test]
    fn stage_name_round_trips_raw_values() {
        let raw = StageName::from("fetch_holder_info".to_string());
        assert_eq!(String::from(raw), "fetch_holder_info");
    }

    #[test]
    fn connection_without_stage_reads_unknown() {
        let conn: Connection =
            serde_json::from_value(connection_json(None, None)).expect("decodes");
        assert_eq!(conn.stage_name(), StageName::Other("unknown".into()));
    }

    #[test]
    fn connection_exposes_stage_and_fail_message() {
        let conn: Connection =
            serde_json::from_value(connection_json(Some("finish"), Some("invalid credentials")))
                .expect("decodes");
        assert_eq!(conn.stage_name(), StageName::Finish);
        assert_eq!(conn.fail_message(), Some("invalid credentials"));
    }

    #[test]
    fn attempt_accepts_date_only_timestamps() {
        // Some fields arrive date-only depending on the endpoint.
        let attempt: Attempt = serde_json::from_value(serde_json::json!({
            "id": "1001",
            "created_at": "2018-01-28",
            "updated_at": "2020-10-16T14:31:21Z",
            "success_at": "2020-10-16T14:31:21Z",
        }))
        .expect("decodes");
        assert!(attempt.success_at.is_some());
        assert!(attempt.fail_at.is_none());
    }
}
