//! # Care Registry Store
//!
//! This crate provides traits and implementations for interacting with the
//! document database behind the care registry. It includes definitions for
//! errors, interfaces, a concrete implementation for the Firestore REST
//! API, and an in-memory implementation for tests.

pub mod errors;
pub mod firestore;
pub mod interfaces;
pub mod memory;
pub mod types;

pub use errors::StoreError;
pub use firestore::FirestoreClient;
pub use interfaces::DocumentStore;
pub use memory::MemoryStore;
pub use types::{FieldMap, StoredDocument};
