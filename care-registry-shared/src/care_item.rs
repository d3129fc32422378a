//! Care-item reference data.
//!
//! Care items describe the categories of care the application offers.
//! They are reference data: written by the catalog loader, read by the
//! application, never edited by hand.

use serde::{Deserialize, Serialize};

/// A single care-item reference record.
///
/// The document key is derived from the two labels via [`care_item_id`]
/// and is not stored as a field, so a record carries exactly `careType`
/// and `name` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareItem {
    /// Care category label (e.g. "Injection").
    pub care_type: String,
    /// Item label within the category.
    pub name: String,
}

impl CareItem {
    /// Create a new care item from its two labels.
    pub fn new(care_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            care_type: care_type.into(),
            name: name.into(),
        }
    }

    /// The derived document key for this item.
    pub fn id(&self) -> String {
        care_item_id(&self.care_type, &self.name)
    }
}

/// Derive the stable document key for a care item.
///
/// Uses format: `{first 3 of careType}_{first 3 of name}`, uppercased.
/// Labels shorter than three characters contribute what they have, so the
/// same inputs always map to the same key and re-running the loader
/// overwrites rather than duplicates.
pub fn care_item_id(care_type: &str, name: &str) -> String {
    format!("{}_{}", key_prefix(care_type), key_prefix(name))
}

fn key_prefix(label: &str) -> String {
    label.chars().take(3).collect::<String>().to_uppercase()
}
