//! # Care Registry Shared
//!
//! Shared types and data structures for the care registry maintenance
//! system: the care-item reference record, the patient record, and the
//! patient code generator.

pub mod care_item;
pub mod patient;
pub mod patient_id;

pub use care_item::{care_item_id, CareItem};
pub use patient::{search_keywords, Patient};
