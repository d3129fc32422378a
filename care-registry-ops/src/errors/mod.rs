//! Error types for the care registry maintenance operations.

use care_registry_store::StoreError;
use thiserror::Error;

/// Errors that can occur in the maintenance operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Error talking to the identity source.
    #[error("Identity error: {0}")]
    IdentityError(String),

    /// Error parsing or decoding data.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Error serializing a record for the store.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Error from the document store.
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),
}

impl OpsError {
    /// Create an identity error.
    pub fn identity(msg: impl Into<String>) -> Self {
        Self::IdentityError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }
}

impl From<reqwest::Error> for OpsError {
    fn from(err: reqwest::Error) -> Self {
        Self::IdentityError(err.to_string())
    }
}
