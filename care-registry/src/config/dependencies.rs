//! Dependency initialization and wiring for the maintenance binary.

use std::env;
use std::sync::Arc;
use tracing::info;

use crate::config::FirebaseConfig;
use crate::MaintenanceError;
use care_registry_ops::identity::{
    IdentitySource, RandomUserClient, DEFAULT_API_URL, DEFAULT_NATIONALITY,
};
use care_registry_store::{DocumentStore, FirestoreClient};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The shared document store client.
    pub store: Arc<dyn DocumentStore>,
    /// The identity source used by the patient seeder.
    pub identity: Arc<dyn IdentitySource>,
}

impl Dependencies {
    /// Initialize all dependencies from the environment.
    ///
    /// # Environment Variables
    ///
    /// - `FIREBASE_CONFIG_FILE`: JSON secret file carrying the Firebase web config
    /// - `FIREBASE_API_KEY`, `FIREBASE_PROJECT_ID`: used when no secret file is named
    /// - `IDENTITY_API_URL`: identity API endpoint (default: https://randomuser.me/api/)
    /// - `IDENTITY_NATIONALITY`: identity nationality filter (default: fr)
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(MaintenanceError)` - If initialization fails
    pub async fn new() -> Result<Self, MaintenanceError> {
        let firebase = FirebaseConfig::load()?;

        info!(project_id = %firebase.project_id, "Initializing dependencies");

        // Initialize the Firestore client
        let store = FirestoreClient::new(&firebase.project_id, &firebase.api_key)
            .map_err(|e| MaintenanceError::config(format!("Failed to create store client: {}", e)))?;

        // Verify the database is reachable before any operation runs
        let healthy = store
            .health_check()
            .await
            .map_err(|e| MaintenanceError::config(format!("Store health check failed: {}", e)))?;

        if !healthy {
            return Err(MaintenanceError::config(
                "Document store rejected the health probe",
            ));
        }

        info!("Document store connection verified");

        // Initialize the identity client for the seeder
        let api_url =
            env::var("IDENTITY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let nationality =
            env::var("IDENTITY_NATIONALITY").unwrap_or_else(|_| DEFAULT_NATIONALITY.to_string());
        let identity = RandomUserClient::with_api(api_url, nationality);

        Ok(Self {
            store: Arc::new(store),
            identity: Arc::new(identity),
        })
    }
}
