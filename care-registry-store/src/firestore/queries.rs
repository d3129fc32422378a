//! Firestore structured query builders.
//!
//! Builds the JSON bodies for `runQuery` requests: full collection scans
//! and field-equality lookups.

use serde_json::{json, Value};

use crate::firestore::values::encode_value;

/// Build a structured query returning every document in a collection.
pub(crate) fn scan_query(collection: &str) -> Value {
    json!({
        "structuredQuery": {
            "from": [{ "collectionId": collection }]
        }
    })
}

/// Build a structured query matching documents whose fields equal the
/// given values, combined with AND.
pub(crate) fn equality_query(collection: &str, filters: &[(&str, Value)]) -> Value {
    if filters.is_empty() {
        return scan_query(collection);
    }

    let mut field_filters: Vec<Value> = filters
        .iter()
        .map(|(field, value)| {
            json!({
                "fieldFilter": {
                    "field": { "fieldPath": field },
                    "op": "EQUAL",
                    "value": encode_value(value)
                }
            })
        })
        .collect();

    let where_clause = if field_filters.len() == 1 {
        field_filters.remove(0)
    } else {
        json!({
            "compositeFilter": {
                "op": "AND",
                "filters": field_filters
            }
        })
    };

    json!({
        "structuredQuery": {
            "from": [{ "collectionId": collection }],
            "where": where_clause
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_query_has_no_where_clause() {
        let query = scan_query("patients");

        assert_eq!(
            query["structuredQuery"]["from"],
            json!([{ "collectionId": "patients" }])
        );
        assert!(query["structuredQuery"].get("where").is_none());
    }

    #[test]
    fn test_single_filter_uses_plain_field_filter() {
        let query = equality_query("patients", &[("firstName", json!("Marie"))]);

        assert_eq!(
            query["structuredQuery"]["where"],
            json!({
                "fieldFilter": {
                    "field": { "fieldPath": "firstName" },
                    "op": "EQUAL",
                    "value": { "stringValue": "Marie" }
                }
            })
        );
    }

    #[test]
    fn test_multiple_filters_are_combined_with_and() {
        let query = equality_query(
            "patients",
            &[
                ("firstName", json!("Marie")),
                ("lastName", json!("Curie")),
            ],
        );

        let composite = &query["structuredQuery"]["where"]["compositeFilter"];

        assert_eq!(composite["op"], "AND");
        assert_eq!(composite["filters"].as_array().unwrap().len(), 2);
        assert_eq!(
            composite["filters"][1]["fieldFilter"]["field"]["fieldPath"],
            "lastName"
        );
    }

    #[test]
    fn test_empty_filter_list_falls_back_to_scan() {
        let query = equality_query("patients", &[]);

        assert!(query["structuredQuery"].get("where").is_none());
    }
}
