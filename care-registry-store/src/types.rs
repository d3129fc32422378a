//! Common types exchanged with the document store.

use serde_json::{Map, Value};

/// A document's fields as a plain JSON object map.
///
/// The store interface works on untyped field maps so the same backend can
/// carry patient records, care items, and whatever the application adds
/// later without a schema change here.
pub type FieldMap = Map<String, Value>;

/// A document read back from a collection scan or a query.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    /// The document key within its collection.
    pub key: String,
    /// The document's fields.
    pub fields: FieldMap,
}

impl StoredDocument {
    /// Create a stored document from its key and fields.
    pub fn new(key: impl Into<String>, fields: FieldMap) -> Self {
        Self {
            key: key.into(),
            fields,
        }
    }

    /// Read a field as a string, if it is present and a string.
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_str_field() {
        let mut fields = FieldMap::new();
        fields.insert("firstName".to_string(), json!("Marie"));
        fields.insert("age".to_string(), json!(67));

        let document = StoredDocument::new("25005ABCD", fields);

        assert_eq!(document.str_field("firstName"), Some("Marie"));
        assert_eq!(document.str_field("age"), None);
        assert_eq!(document.str_field("missing"), None);
    }
}
