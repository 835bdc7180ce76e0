//! Codec between plain JSON and Firestore's typed REST values.
//!
//! The REST API wraps every field value in a single-key object naming its
//! type, e.g. `{"stringValue": "buy milk"}` or
//! `{"mapValue": {"fields": {...}}}`. Integers travel as decimal strings.

use serde_json::{Map, Number, Value, json};

/// Encode an attribute mapping as Firestore `fields`
pub(crate) fn encode_fields(fields: &Map<String, Value>) -> Value {
    let encoded: Map<String, Value> = fields
        .iter()
        .map(|(name, value)| (name.clone(), encode_value(value)))
        .collect();
    Value::Object(encoded)
}

/// Decode Firestore `fields` back into a plain attribute mapping
pub(crate) fn decode_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    fields
        .iter()
        .map(|(name, value)| (name.clone(), decode_value(value)))
        .collect()
}

fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({"nullValue": null}),
        Value::Bool(b) => json!({"booleanValue": b}),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                json!({"integerValue": i.to_string()})
            } else {
                // u64 beyond i64 range and every float go out as doubles
                json!({"doubleValue": n.as_f64()})
            }
        }
        Value::String(s) => json!({"stringValue": s}),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(encode_value).collect();
            json!({"arrayValue": {"values": values}})
        }
        Value::Object(fields) => json!({"mapValue": {"fields": encode_fields(fields)}}),
    }
}

fn decode_value(value: &Value) -> Value {
    let Some(typed) = value.as_object() else {
        return Value::Null;
    };

    if typed.contains_key("nullValue") {
        return Value::Null;
    }
    if let Some(b) = typed.get("booleanValue").and_then(Value::as_bool) {
        return Value::Bool(b);
    }
    if let Some(raw) = typed.get("integerValue") {
        // Served as a decimal string, though some emulators emit numbers
        let parsed = match raw {
            Value::String(s) => s.parse::<i64>().ok(),
            Value::Number(n) => n.as_i64(),
            _ => None,
        };
        if let Some(i) = parsed {
            return Value::Number(Number::from(i));
        }
        return Value::Null;
    }
    if let Some(f) = typed.get("doubleValue").and_then(Value::as_f64) {
        return Number::from_f64(f).map_or(Value::Null, Value::Number);
    }
    if let Some(s) = typed.get("stringValue").and_then(Value::as_str) {
        return Value::String(s.to_string());
    }
    if let Some(s) = typed.get("timestampValue").and_then(Value::as_str) {
        return Value::String(s.to_string());
    }
    if let Some(s) = typed.get("referenceValue").and_then(Value::as_str) {
        return Value::String(s.to_string());
    }
    if let Some(array) = typed.get("arrayValue").and_then(Value::as_object) {
        let items = array
            .get("values")
            .and_then(Value::as_array)
            .map(|values| values.iter().map(decode_value).collect())
            .unwrap_or_default();
        return Value::Array(items);
    }
    if let Some(map) = typed.get("mapValue").and_then(Value::as_object) {
        let fields = map
            .get("fields")
            .and_then(Value::as_object)
            .map(decode_fields)
            .unwrap_or_default();
        return Value::Object(fields);
    }

    // Geo points, bytes, and anything newer than this codec
    Value::Null
}
