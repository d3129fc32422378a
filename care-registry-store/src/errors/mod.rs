//! Error types for the care registry store.

mod store_error;

pub use store_error::StoreError;
