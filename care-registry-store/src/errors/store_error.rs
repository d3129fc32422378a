//! Store error types.
//!
//! This module defines the error types that can occur during document store operations.

use thiserror::Error;

/// Errors that can occur during document store operations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Failed to reach the store at all.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The store rejected a single-document write.
    #[error("Write error: {0}")]
    WriteError(String),

    /// An atomic batch commit failed; none of its writes were applied.
    #[error("Batch commit error: {0}")]
    BatchCommitError(String),

    /// A filtered or full collection query failed.
    #[error("Query error: {0}")]
    QueryError(String),

    /// A partial field update failed.
    #[error("Update error: {0}")]
    UpdateError(String),

    /// Failed to decode a store response.
    #[error("Decode error: {0}")]
    DecodeError(String),
}

impl StoreError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a write error.
    pub fn write(msg: impl Into<String>) -> Self {
        Self::WriteError(msg.into())
    }

    /// Create a batch commit error.
    pub fn batch_commit(msg: impl Into<String>) -> Self {
        Self::BatchCommitError(msg.into())
    }

    /// Create a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryError(msg.into())
    }

    /// Create an update error.
    pub fn update(msg: impl Into<String>) -> Self {
        Self::UpdateError(msg.into())
    }

    /// Create a decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::DecodeError(msg.into())
    }
}
