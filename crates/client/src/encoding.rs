//! Parameter encoding.
//!
//! A route's parameter type statically selects exactly one of the two
//! encodings: JSON bodies (wrapped in the API's `{"data": ...}` envelope)
//! or flattened query-string pairs. Failures surface as
//! [`ApiError::Encoding`] before any network traffic.

use ledgerlink_domain::{ApiError, Result};
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
struct RequestBody<'a, T: Serialize> {
    data: &'a T,
}

/// Serialize body parameters into the wire envelope.
pub(crate) fn encode_body<T: Serialize>(params: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(&RequestBody { data: params })
        .map_err(|err| ApiError::Encoding(err.to_string()))
}

/// Flatten query parameters into string pairs. Keys are the serde-declared
/// wire names; nulls are skipped; scalars take their natural textual form;
/// arrays of scalars are comma-joined. Nested objects are rejected.
pub(crate) fn encode_query<T: Serialize>(params: &T) -> Result<Vec<(String, String)>> {
    let value = serde_json::to_value(params).map_err(|err| ApiError::Encoding(err.to_string()))?;
    let Value::Object(fields) = value else {
        return Err(ApiError::Encoding("query parameters must serialize to an object".into()));
    };

    let mut pairs = Vec::with_capacity(fields.len());
    for (key, value) in fields {
        match value {
            Value::Null => continue,
            Value::String(text) => pairs.push((key, text)),
            Value::Bool(flag) => pairs.push((key, flag.to_string())),
            Value::Number(number) => pairs.push((key, number.to_string())),
            Value::Array(items) => {
                let mut parts = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(text) => parts.push(text),
                        Value::Bool(flag) => parts.push(flag.to_string()),
                        Value::Number(number) => parts.push(number.to_string()),
                        _ => {
                            return Err(ApiError::Encoding(format!(
                                "query field `{key}` holds a non-scalar element"
                            )))
                        }
                    }
                }
                pairs.push((key, parts.join(",")));
            }
            Value::Object(_) => {
                return Err(ApiError::Encoding(format!("query field `{key}` is a nested object")))
            }
        }
    }

    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use ledgerlink_domain::{ProviderParams, TransactionParams};

    use super::*;

    #[test]
    fn body_is_wrapped_in_data_envelope() {
        #[derive(Serialize)]
        struct Params {
            identifier: String,
        }

        let bytes = encode_body(&Params { identifier: "customer-1".into() }).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["data"]["identifier"], "customer-1");
    }

    #[test]
    fn query_keys_are_snake_case_wire_names() {
        let params = ProviderParams {
            from_id: Some(108),
            country_code: Some("XF".into()),
            include_fake_providers: Some(true),
            ..Default::default()
        };
        let mut pairs = encode_query(&params).unwrap();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("country_code".to_string(), "XF".to_string()),
                ("from_id".to_string(), "108".to_string()),
                ("include_fake_providers".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn absent_optionals_produce_no_pairs() {
        let pairs = encode_query(&TransactionParams::default()).unwrap();
        assert!(pairs.is_empty());
    }

    #[test]
    fn scalar_arrays_are_comma_joined() {
        #[derive(Serialize)]
        struct Params {
            fetch_scopes: Vec<String>,
        }

        let pairs =
            encode_query(&Params { fetch_scopes: vec!["accounts".into(), "transactions".into()] })
                .unwrap();
        assert_eq!(pairs, vec![("fetch_scopes".to_string(), "accounts,transactions".to_string())]);
    }

    #[test]
    fn nested_objects_are_an_encoding_error() {
        #[derive(Serialize)]
        struct Inner {
            a: u32,
        }
        #[derive(Serialize)]
        struct Params {
            nested: Inner,
        }

        let err = encode_query(&Params { nested: Inner { a: 1 } }).unwrap_err();
        assert!(matches!(err, ApiError::Encoding(_)));
    }

    #[test]
    fn non_object_roots_are_an_encoding_error() {
        let err = encode_query(&42u32).unwrap_err();
        assert!(matches!(err, ApiError::Encoding(_)));
    }
}
