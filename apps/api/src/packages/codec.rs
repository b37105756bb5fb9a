//! Decoding/encoding of the flexible package fields stored as TEXT.
//!
//! Historical rows hold anything from valid JSON to legacy garbage; a read
//! must never fail because of them. Decoding therefore falls back to a
//! caller-supplied default on any malformed input, and encoding refuses to
//! persist empty placeholders (they become NULL instead).

use serde_json::Value;

/// Decodes a stored field value.
///
/// Absent or NULL input yields `default`. Text is parsed as JSON, with any
/// parse failure yielding `default`. A value that is already structured is
/// returned as-is.
pub fn decode(raw: Option<&Value>, default: Value) -> Value {
    match raw {
        None | Some(Value::Null) => default,
        Some(Value::String(text)) => serde_json::from_str(text).unwrap_or(default),
        Some(other) => other.clone(),
    }
}

/// [`decode`] over a TEXT column as it comes out of a row struct.
pub fn decode_text(raw: Option<&str>, default: Value) -> Value {
    let raw = raw.map(|s| Value::String(s.to_string()));
    decode(raw.as_ref(), default)
}

/// Decodes a TEXT column expected to hold a string sequence, tolerating
/// anything else (missing, malformed, or a non-sequence) as empty.
pub fn decode_string_list(raw: Option<&str>) -> Vec<String> {
    match raw {
        None => Vec::new(),
        Some(text) => serde_json::from_str(text).unwrap_or_default(),
    }
}

/// Encodes a structured value for storage. Empty values (null, empty
/// sequence, object with no populated members) become `None` so the column
/// is NULL rather than a placeholder.
pub fn encode(value: &Value) -> Option<String> {
    if is_empty(value) {
        None
    } else {
        Some(value.to_string())
    }
}

/// Encodes any serializable value via its JSON form.
pub fn encode_as<T: serde::Serialize>(value: &T) -> Option<String> {
    match serde_json::to_value(value) {
        Ok(v) => encode(&v),
        Err(_) => None,
    }
}

/// A value is empty when it carries no populated member anywhere: null,
/// blank string, empty sequence, or an object of only empty members.
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(members) => members.values().all(is_empty),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_absent_returns_default() {
        assert_eq!(decode(None, json!([])), json!([]));
        assert_eq!(decode(Some(&Value::Null), json!({"a": 1})), json!({"a": 1}));
    }

    #[test]
    fn test_decode_parses_valid_text() {
        let raw = json!(r#"["x", "y"]"#);
        assert_eq!(decode(Some(&raw), json!([])), json!(["x", "y"]));
    }

    #[test]
    fn test_decode_malformed_text_never_errors() {
        for garbage in ["not json", "{truncated", "", "[1,"] {
            let raw = Value::String(garbage.to_string());
            assert_eq!(decode(Some(&raw), json!([])), json!([]), "input: {garbage:?}");
        }
    }

    #[test]
    fn test_decode_structured_value_passes_through() {
        let raw = json!({"url": "/a.png"});
        assert_eq!(decode(Some(&raw), json!(null)), json!({"url": "/a.png"}));
    }

    #[test]
    fn test_decode_text_wraps_column_values() {
        assert_eq!(decode_text(Some(r#"{"a":1}"#), json!({})), json!({"a":1}));
        assert_eq!(decode_text(Some("broken"), json!({})), json!({}));
        assert_eq!(decode_text(None, json!({})), json!({}));
    }

    #[test]
    fn test_decode_string_list() {
        assert_eq!(decode_string_list(Some(r#"["a","b"]"#)), vec!["a", "b"]);
        assert_eq!(decode_string_list(Some("oops")), Vec::<String>::new());
        assert_eq!(decode_string_list(Some(r#"{"k":1}"#)), Vec::<String>::new());
        assert_eq!(decode_string_list(None), Vec::<String>::new());
    }

    #[test]
    fn test_encode_empty_yields_null() {
        assert_eq!(encode(&json!(null)), None);
        assert_eq!(encode(&json!([])), None);
        assert_eq!(encode(&json!({})), None);
        // An object whose members are all blank is still a placeholder.
        assert_eq!(
            encode(&json!({"included": [], "excluded": [], "booking_information": ""})),
            None
        );
    }

    #[test]
    fn test_encode_populated_values() {
        assert_eq!(encode(&json!(["a"])), Some(r#"["a"]"#.to_string()));
        assert!(encode(&json!({"included": ["Breakfast"]})).is_some());
        // Zero is a populated member, not an empty one.
        assert!(encode(&json!({"count": 0})).is_some());
    }

    #[test]
    fn test_round_trip_up_to_empty_null_identification() {
        let v = json!({"included": ["Breakfast"], "excluded": ["Lunch"]});
        let text = encode(&v).expect("populated value must encode");
        assert_eq!(decode_text(Some(&text), json!(null)), v);

        // The empty side of the law: empty encodes to NULL, NULL decodes to
        // the default.
        assert_eq!(encode(&json!([])), None);
        assert_eq!(decode_text(None, json!([])), json!([]));
    }
}
