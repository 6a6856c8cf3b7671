//! Loose numeric coercion for producer JSON.

use serde_json::{Map, Value};

/// Read a JSON value as a number.
///
/// Numbers pass through, strings are trimmed and parsed, booleans are 0/1.
/// Everything else (`null`, arrays, objects, unparseable text) has no
/// numeric value. The result may still be non-finite (`"inf"`), callers
/// filter that.
pub fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Like [`number`], restricted to finite values.
pub fn finite(value: &Value) -> Option<f64> {
    number(value).filter(|v| v.is_finite())
}

/// First non-null field among `keys`.
pub fn field<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| !v.is_null())
}
