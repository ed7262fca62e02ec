//! App-reentry URL bridge.
//!
//! When the hosted connect flow finishes (or needs attention) it re-enters
//! the application through a private-scheme URL whose last path segment is a
//! percent-encoded JSON envelope. [`parse_callback`] recognizes those URLs
//! and decodes them with the same error-first rules as HTTP responses.

use ledgerlink_domain::{ApiError, ConnectCallback, Result};
use url::Url;

use crate::decode::decode_response;

/// URL scheme the connect flow re-enters the application with.
pub const CALLBACK_SCHEME: &str = "ledgerlink";

/// Expected host component of a callback URL.
pub const CALLBACK_HOST: &str = "connect";

/// Parse an app-reentry URL.
///
/// Returns `Ok(None)` when the URL is not a connect callback at all (wrong
/// scheme or host, or not parseable as a URL), so callers can route
/// unrelated deep links elsewhere. A recognized callback with a bad payload
/// is an error: an error envelope surfaces as [`ApiError::Api`], a missing
/// payload as [`ApiError::NoData`].
pub fn parse_callback(url: &str) -> Result<Option<ConnectCallback>> {
    let Ok(url) = Url::parse(url) else {
        return Ok(None);
    };
    if url.scheme() != CALLBACK_SCHEME || url.host_str() != Some(CALLBACK_HOST) {
        return Ok(None);
    }

    let payload = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty());
    let Some(payload) = payload else {
        return Err(ApiError::NoData);
    };

    let decoded = urlencoding::decode(payload)
        .map_err(|err| ApiError::Decoding(format!("callback payload is not UTF-8: {err}")))?;

    decode_response::<ConnectCallback>(Some(decoded.as_bytes()), None)
        .map(|envelope| Some(envelope.data))
}

#[cfg(test)]
mod tests {
    use ledgerlink_domain::CallbackStage;

    use super::*;

    fn callback_url(payload: &str) -> String {
        format!("{CALLBACK_SCHEME}://{CALLBACK_HOST}/{}", urlencoding::encode(payload))
    }

    #[test]
    fn decodes_a_success_callback() {
        let url = callback_url(
            r#"{"data":{"connection_id":"111","stage":"success","secret":"conn-secret"}}"#,
        );
        let callback = parse_callback(&url).unwrap().expect("recognized");
        assert_eq!(callback.stage, CallbackStage::Success);
        assert_eq!(callback.connection_id.as_deref(), Some("111"));
        assert_eq!(callback.secret.as_deref(), Some("conn-secret"));
    }

    #[test]
    fn foreign_urls_are_not_callbacks() {
        assert!(parse_callback("https://connect/whatever").unwrap().is_none());
        assert!(parse_callback("ledgerlink://settings/profile").unwrap().is_none());
        assert!(parse_callback("not a url at all").unwrap().is_none());
    }

    #[test]
    fn missing_payload_is_no_data() {
        let err = parse_callback("ledgerlink://connect").unwrap_err();
        assert!(matches!(err, ApiError::NoData));
        let err = parse_callback("ledgerlink://connect/").unwrap_err();
        assert!(matches!(err, ApiError::NoData));
    }

    #[test]
    fn error_envelopes_surface_as_api_errors() {
        let url = callback_url(
            r#"{"error":{"class":"ConnectionFailed","message":"boom","documentation_url":"https://docs.ledgerlink.com/errors"}}"#,
        );
        match parse_callback(&url).unwrap_err() {
            ApiError::Api { class, .. } => assert_eq!(class, "ConnectionFailed"),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn duplicated_connections_are_reported() {
        let url = callback_url(
            r#"{"data":{"duplicated_connection_id":"222","stage":"error"}}"#,
        );
        let callback = parse_callback(&url).unwrap().expect("recognized");
        assert_eq!(callback.stage, CallbackStage::Error);
        assert_eq!(callback.duplicated_connection_id.as_deref(), Some("222"));
    }
}
