//! Payload carried by an app-reentry (connect callback) URL.

use std::collections::HashMap;

use serde::Deserialize;

/// Stage tag reported through the callback URL. Mirrors the poller's
/// terminal states so both paths converge on the same delegate handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallbackStage {
    /// Fetching is still in progress; keep polling.
    Fetching,
    /// The connection's stored data changed; the run is complete.
    Success,
    /// An error occurred during the fetching process.
    Error,
}

/// Decoded callback payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectCallback {
    #[serde(default)]
    pub connection_id: Option<String>,
    #[serde(default)]
    pub duplicated_connection_id: Option<String>,
    pub stage: CallbackStage,
    /// Connection secret to continue polling with, when present.
    #[serde(default)]
    pub secret: Option<String>,
    #[serde(default)]
    pub custom_fields: Option<HashMap<String, String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_fetching_payload() {
        let callback: ConnectCallback = serde_json::from_str(
            r#"{"connection_id":"111","stage":"fetching","secret":"conn-secret"}"#,
        )
        .expect("decodes");
        assert_eq!(callback.stage, CallbackStage::Fetching);
        assert_eq!(callback.secret.as_deref(), Some("conn-secret"));
    }

    #[test]
    fn rejects_unknown_stage_tags() {
        let result = serde_json::from_str::<ConnectCallback>(r#"{"stage":"paused"}"#);
        assert!(result.is_err());
    }
}
