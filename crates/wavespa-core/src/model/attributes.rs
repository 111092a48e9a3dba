//! Helpers for reading loosely typed attribute values.

use serde_json::Value;

pub use wavespa_api::Attributes;

/// Integer view of an attribute. Booleans read as 0/1.
pub fn int(attrs: &Attributes, key: &str) -> Option<i64> {
    attrs.get(key).and_then(as_int)
}

/// Truthiness of an attribute: non-zero numbers, `true`, non-empty strings.
/// A missing attribute is falsy.
pub fn flag(attrs: &Attributes, key: &str) -> bool {
    attrs.get(key).is_some_and(truthy)
}

pub fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn truthiness() {
        assert!(truthy(&json!(1)));
        assert!(truthy(&json!(true)));
        assert!(truthy(&json!("x")));
        assert!(!truthy(&json!(0)));
        assert!(!truthy(&json!(0.0)));
        assert!(!truthy(&json!(false)));
        assert!(!truthy(&json!(null)));
        assert!(!truthy(&json!("")));
    }

    #[test]
    fn int_reads_bools_and_numbers() {
        let attrs = json!({"a": 3, "b": true, "c": "7"});
        let attrs = attrs.as_object().cloned().unwrap_or_default();
        assert_eq!(int(&attrs, "a"), Some(3));
        assert_eq!(int(&attrs, "b"), Some(1));
        assert_eq!(int(&attrs, "c"), None);
        assert_eq!(int(&attrs, "missing"), None);
        assert!(!flag(&attrs, "missing"));
    }
}
