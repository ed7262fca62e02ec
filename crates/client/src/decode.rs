//! Response decoding.
//!
//! Business errors arrive with 200-class statuses, so the payload is probed
//! as an error document *before* any attempt at envelope decoding. The
//! order here is load-bearing; see [`decode_response`].

use ledgerlink_domain::dates::MALFORMED_DATE_MARKER;
use ledgerlink_domain::{ApiError, Envelope, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    class: String,
    message: String,
    documentation_url: String,
}

/// Decode a raw response into an envelope or an error. Strict order:
/// 1. a transport error wins over any payload;
/// 2. an absent payload is `NoData`;
/// 3. a payload shaped as `{"error": {...}}` is a business error, with the
///    raw bytes retained for diagnostics;
/// 4. otherwise the payload must decode as an envelope; unparseable date
///    literals become `MalformedDate`, anything else `Decoding`.
pub(crate) fn decode_response<T>(
    bytes: Option<&[u8]>,
    transport_error: Option<ApiError>,
) -> Result<Envelope<T>>
where
    T: DeserializeOwned,
{
    if let Some(err) = transport_error {
        return Err(err);
    }

    let Some(bytes) = bytes else {
        return Err(ApiError::NoData);
    };

    if let Ok(ErrorEnvelope { error }) = serde_json::from_slice::<ErrorEnvelope>(bytes) {
        return Err(ApiError::Api {
            class: error.class,
            message: error.message,
            documentation_url: error.documentation_url,
            raw: Some(bytes.to_vec()),
        });
    }

    serde_json::from_slice(bytes).map_err(classify_decoding_error)
}

fn classify_decoding_error(err: serde_json::Error) -> ApiError {
    let message = err.to_string();
    if let Some(rest) = message.split(MALFORMED_DATE_MARKER).nth(1) {
        if let Some(literal) = rest.split('`').nth(1) {
            return ApiError::MalformedDate(literal.to_string());
        }
    }
    ApiError::Decoding(message)
}
