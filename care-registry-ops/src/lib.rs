//! # Care Registry Ops
//!
//! This crate provides the maintenance operations run against the care
//! registry's document database.
//!
//! ## Architecture
//!
//! Each operation is an independent run-to-completion unit over an
//! injected document store:
//!
//! 1. **Catalog**: Upserts the fixed care-item reference catalog
//! 2. **Seeder**: Creates synthetic patient records from the identity source
//! 3. **Reconciler**: Recomputes the derived search keyword lists
//!
//! Operations tolerate per-record failures by logging them and moving on;
//! only the catalog's batch commit is all-or-nothing.

pub mod catalog;
pub mod errors;
pub mod identity;
pub mod reconciler;
pub mod seeder;
pub mod summary;

pub use errors::OpsError;
pub use summary::RunSummary;

use care_registry_store::FieldMap;

/// Serialize a record into the field map the store expects.
pub(crate) fn to_field_map<T: serde::Serialize>(record: &T) -> Result<FieldMap, OpsError> {
    match serde_json::to_value(record) {
        Ok(serde_json::Value::Object(fields)) => Ok(fields),
        Ok(other) => Err(OpsError::serialization(format!(
            "expected a JSON object, got {}",
            other
        ))),
        Err(e) => Err(OpsError::serialization(e.to_string())),
    }
}
