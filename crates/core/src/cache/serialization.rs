//! Pure functions for converting values to and from cache bytes.
//!
//! Structured values are stored as JSON text. Plain strings are stored as
//! the string itself so counters and markers stay readable with
//! `redis-cli`, matching what `INCR` writes.

use serde_json::Value;

use super::{CacheError, Result};

/// Encodes a value for storage.
///
/// Strings are written verbatim; everything else is written as JSON.
pub fn encode_value(value: &Value) -> Result<Vec<u8>> {
    match value {
        Value::String(s) => Ok(s.as_bytes().to_vec()),
        other => serde_json::to_vec(other).map_err(|e| CacheError::Serialization(e.to_string())),
    }
}

/// Decodes stored bytes as JSON.
///
/// Callers that must not fail treat an error as "return the raw payload".
pub fn decode_value(bytes: &[u8]) -> Result<Value> {
    serde_json::from_slice(bytes).map_err(|e| CacheError::Serialization(e.to_string()))
}

/// Returns true for values not worth caching: null, "", [] and {}.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Parses a stored counter. Missing values count as zero.
pub fn parse_counter(bytes: Option<&[u8]>) -> Result<i64> {
    let Some(bytes) = bytes else {
        return Ok(0);
    };
    let text = std::str::from_utf8(bytes)
        .map_err(|_| CacheError::OperationFailed("value is not an integer".to_string()))?;
    text.trim()
        .parse::<i64>()
        .map_err(|_| CacheError::OperationFailed("value is not an integer".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_encode_object_as_json() {
        let bytes = encode_value(&json!({"title": "A"})).unwrap();
        assert_eq!(bytes, br#"{"title":"A"}"#);
    }

    #[test]
    fn test_encode_string_verbatim() {
        let bytes = encode_value(&json!("revoked")).unwrap();
        assert_eq!(bytes, b"revoked");
    }

    #[test]
    fn test_encode_number_as_text() {
        assert_eq!(encode_value(&json!(42)).unwrap(), b"42");
    }

    #[test]
    fn test_decode_object() {
        let value = decode_value(br#"{"title":"A"}"#).unwrap();
        assert_eq!(value, json!({"title": "A"}));
    }

    #[test]
    fn test_decode_plain_text_fails() {
        let err = decode_value(b"not json").unwrap_err();
        assert!(matches!(err, CacheError::Serialization(_)));
    }

    #[test]
    fn test_is_empty_value() {
        assert!(is_empty_value(&Value::Null));
        assert!(is_empty_value(&json!("")));
        assert!(is_empty_value(&json!([])));
        assert!(is_empty_value(&json!({})));
        assert!(!is_empty_value(&json!(0)));
        assert!(!is_empty_value(&json!(false)));
        assert!(!is_empty_value(&json!([1])));
        assert!(!is_empty_value(&json!({"a": 1})));
    }

    #[test]
    fn test_parse_counter() {
        assert_eq!(parse_counter(None).unwrap(), 0);
        assert_eq!(parse_counter(Some(b"7")).unwrap(), 7);
        assert_eq!(parse_counter(Some(b" 12\n")).unwrap(), 12);
        assert!(parse_counter(Some(b"seven")).is_err());
    }
}
