//! Firebase project configuration.
//!
//! The store client needs the project id and the web API key. The other
//! fields of the application's web config are recognized so its secret
//! file can be dropped in unchanged, but nothing here uses them.

use std::env;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::MaintenanceError;

/// Environment variable naming a JSON file to load the config from.
pub const CONFIG_FILE_ENV: &str = "FIREBASE_CONFIG_FILE";

/// Firebase web-app configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirebaseConfig {
    /// The project's web API key.
    pub api_key: String,
    /// The Firebase project id.
    pub project_id: String,
    #[serde(default)]
    pub app_id: Option<String>,
    #[serde(default)]
    pub messaging_sender_id: Option<String>,
    #[serde(default)]
    pub auth_domain: Option<String>,
    #[serde(default)]
    pub storage_bucket: Option<String>,
    #[serde(default)]
    pub measurement_id: Option<String>,
}

impl FirebaseConfig {
    /// Load the configuration.
    ///
    /// A secret file named by `FIREBASE_CONFIG_FILE` wins; without one the
    /// individual `FIREBASE_*` environment variables are read.
    pub fn load() -> Result<Self, MaintenanceError> {
        match env::var(CONFIG_FILE_ENV) {
            Ok(path) => Self::from_file(Path::new(&path)),
            Err(_) => Self::from_env(),
        }
    }

    /// Load the configuration from a JSON secret file.
    pub fn from_file(path: &Path) -> Result<Self, MaintenanceError> {
        let raw = fs::read_to_string(path)
            .map_err(|e| MaintenanceError::config(format!("{}: {}", path.display(), e)))?;

        Self::from_json(&raw)
            .map_err(|e| MaintenanceError::config(format!("{}: {}", path.display(), e)))
    }

    /// Load the configuration from `FIREBASE_*` environment variables.
    pub fn from_env() -> Result<Self, MaintenanceError> {
        let api_key = env::var("FIREBASE_API_KEY")
            .map_err(|_| MaintenanceError::config("FIREBASE_API_KEY is not set"))?;
        let project_id = env::var("FIREBASE_PROJECT_ID")
            .map_err(|_| MaintenanceError::config("FIREBASE_PROJECT_ID is not set"))?;

        Ok(Self {
            api_key,
            project_id,
            app_id: env::var("FIREBASE_APP_ID").ok(),
            messaging_sender_id: env::var("FIREBASE_MESSAGING_SENDER_ID").ok(),
            auth_domain: env::var("FIREBASE_AUTH_DOMAIN").ok(),
            storage_bucket: env::var("FIREBASE_STORAGE_BUCKET").ok(),
            measurement_id: env::var("FIREBASE_MEASUREMENT_ID").ok(),
        })
    }

    fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
