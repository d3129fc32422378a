//! Firestore typed-value conversion.
//!
//! The Firestore REST API wraps every field value in a one-key object
//! naming its type (`{"stringValue": "x"}`, `{"integerValue": "3"}`, ...).
//! This module converts between plain JSON field maps and that wire form.

use serde_json::{json, Map, Value};

use crate::types::FieldMap;

/// Encode a plain field map into Firestore's `fields` object.
pub(crate) fn encode_fields(fields: &FieldMap) -> Value {
    let encoded: Map<String, Value> = fields
        .iter()
        .map(|(name, value)| (name.clone(), encode_value(value)))
        .collect();

    Value::Object(encoded)
}

/// Encode a single JSON value into its Firestore typed form.
pub(crate) fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(flag) => json!({ "booleanValue": flag }),
        Value::Number(number) => {
            // Firestore transports 64-bit integers as decimal strings.
            if let Some(integer) = number.as_i64() {
                json!({ "integerValue": integer.to_string() })
            } else {
                json!({ "doubleValue": number.as_f64() })
            }
        }
        Value::String(text) => json!({ "stringValue": text }),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(encode_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(map) => {
            let fields: Map<String, Value> = map
                .iter()
                .map(|(name, value)| (name.clone(), encode_value(value)))
                .collect();
            json!({ "mapValue": { "fields": fields } })
        }
    }
}

/// Decode a Firestore `fields` object into a plain field map.
pub(crate) fn decode_fields(fields: &Value) -> FieldMap {
    let mut decoded = FieldMap::new();

    if let Some(map) = fields.as_object() {
        for (name, value) in map {
            decoded.insert(name.clone(), decode_value(value));
        }
    }

    decoded
}

/// Decode a single Firestore typed value into plain JSON.
///
/// Value types this system never writes (timestamps, references) decode to
/// their raw payload; anything unrecognized decodes to null rather than
/// failing the whole document, since the store may hold fields written by
/// the application.
pub(crate) fn decode_value(value: &Value) -> Value {
    let map = match value.as_object() {
        Some(map) => map,
        None => return Value::Null,
    };

    if let Some(text) = map.get("stringValue") {
        return text.clone();
    }
    if let Some(integer) = map.get("integerValue") {
        // Transported as a decimal string; keep the raw value if it is not.
        if let Some(parsed) = integer.as_str().and_then(|text| text.parse::<i64>().ok()) {
            return json!(parsed);
        }
        return integer.clone();
    }
    if let Some(double) = map.get("doubleValue") {
        return double.clone();
    }
    if let Some(flag) = map.get("booleanValue") {
        return flag.clone();
    }
    if map.contains_key("nullValue") {
        return Value::Null;
    }
    if let Some(array) = map.get("arrayValue") {
        let items = array
            .get("values")
            .and_then(Value::as_array)
            .map(|values| values.iter().map(decode_value).collect())
            .unwrap_or_default();
        return Value::Array(items);
    }
    if let Some(nested) = map.get("mapValue") {
        let fields = nested.get("fields").cloned().unwrap_or(Value::Null);
        return Value::Object(decode_fields(&fields));
    }
    if let Some(timestamp) = map.get("timestampValue") {
        return timestamp.clone();
    }
    if let Some(reference) = map.get("referenceValue") {
        return reference.clone();
    }

    Value::Null
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_scalar_values() {
        assert_eq!(encode_value(&json!("Marie")), json!({ "stringValue": "Marie" }));
        assert_eq!(encode_value(&json!(42)), json!({ "integerValue": "42" }));
        assert_eq!(encode_value(&json!(1.5)), json!({ "doubleValue": 1.5 }));
        assert_eq!(encode_value(&json!(true)), json!({ "booleanValue": true }));
        assert_eq!(encode_value(&Value::Null), json!({ "nullValue": null }));
    }

    #[test]
    fn test_encode_array_value() {
        let encoded = encode_value(&json!(["marie", "curie"]));

        assert_eq!(
            encoded,
            json!({
                "arrayValue": {
                    "values": [
                        { "stringValue": "marie" },
                        { "stringValue": "curie" }
                    ]
                }
            })
        );
    }

    #[test]
    fn test_encode_fields_wraps_each_field() {
        let mut fields = FieldMap::new();
        fields.insert("firstName".to_string(), json!("Marie"));
        fields.insert("extraInfo".to_string(), Value::Null);

        let encoded = encode_fields(&fields);

        assert_eq!(encoded["firstName"], json!({ "stringValue": "Marie" }));
        assert_eq!(encoded["extraInfo"], json!({ "nullValue": null }));
    }

    #[test]
    fn test_decode_fields_from_query_result() {
        let raw = json!({
            "firstName": { "stringValue": "Marie" },
            "extraInfo": { "nullValue": null },
            "caregivers": {
                "arrayValue": {
                    "values": [{ "stringValue": "YqIMZG0vYPeGdc9yzRnK9SkTiEi1" }]
                }
            }
        });

        let decoded = decode_fields(&raw);

        assert_eq!(decoded["firstName"], json!("Marie"));
        assert_eq!(decoded["extraInfo"], Value::Null);
        assert_eq!(decoded["caregivers"], json!(["YqIMZG0vYPeGdc9yzRnK9SkTiEi1"]));
    }

    #[test]
    fn test_decode_integer_transported_as_string() {
        assert_eq!(decode_value(&json!({ "integerValue": "67" })), json!(67));
    }

    #[test]
    fn test_decode_nested_map_value() {
        let raw = json!({
            "mapValue": {
                "fields": {
                    "city": { "stringValue": "Paris" }
                }
            }
        });

        assert_eq!(decode_value(&raw), json!({ "city": "Paris" }));
    }

    #[test]
    fn test_decode_unknown_type_becomes_null() {
        let raw = json!({ "geoPointValue": { "latitude": 48.85, "longitude": 2.35 } });

        assert_eq!(decode_value(&raw), Value::Null);
    }

    #[test]
    fn test_encode_decode_keeps_patient_fields() {
        let mut fields = FieldMap::new();
        fields.insert("id".to_string(), json!("25005ABCD"));
        fields.insert("searchKeywords".to_string(), json!(["marie", "curie", "25005abcd"]));

        let decoded = decode_fields(&encode_fields(&fields));

        assert_eq!(decoded, fields);
    }
}
