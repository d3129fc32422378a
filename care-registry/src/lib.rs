//! # Care Registry
//!
//! Main library for the care registry maintenance binary.
//!
//! This crate provides the entry point and configuration for running the
//! maintenance operations against the registry's document database.

pub mod config;

pub use config::{Dependencies, FirebaseConfig};

use thiserror::Error;

/// Errors that can occur during maintenance startup or execution.
#[derive(Error, Debug)]
pub enum MaintenanceError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Store error.
    #[error("Store error: {0}")]
    StoreError(#[from] care_registry_store::StoreError),

    /// Operation error.
    #[error("Operation error: {0}")]
    OpsError(#[from] care_registry_ops::OpsError),
}

impl MaintenanceError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
