//! Synthetic patient seeding.
//!
//! Pulls identities from the identity source one at a time, assigns each a
//! fresh patient code, and inserts the ones whose full name is not already
//! present in the patient collection.

use std::sync::Arc;

use serde_json::json;
use tracing::{error, info, instrument};

use crate::errors::OpsError;
use crate::identity::{IdentitySource, PersonProfile};
use crate::summary::RunSummary;
use care_registry_shared::{patient_id, Patient};
use care_registry_store::DocumentStore;

/// Collection holding the patient records.
pub const PATIENTS_COLLECTION: &str = "patients";

/// Number of patients one seeding run attempts to create.
pub const SEED_COUNT: usize = 30;

/// Caregiver references assigned to every seeded patient, so the test
/// account sees the new records immediately.
pub const DEFAULT_CAREGIVERS: &[&str] = &["YqIMZG0vYPeGdc9yzRnK9SkTiEi1"];

/// Seeder that creates synthetic patient records.
///
/// Records are created strictly one at a time, so the duplicate check for
/// each record observes every insertion made earlier in the same run. The
/// query-then-write check is not safe under concurrent seeding; if that is
/// ever needed the uniqueness guarantee has to move into the store.
pub struct PatientSeeder {
    store: Arc<dyn DocumentStore>,
    identity: Arc<dyn IdentitySource>,
    count: usize,
}

impl PatientSeeder {
    /// Create a new seeder with the default record count.
    pub fn new(store: Arc<dyn DocumentStore>, identity: Arc<dyn IdentitySource>) -> Self {
        Self::with_count(store, identity, SEED_COUNT)
    }

    /// Create a new seeder with a custom record count.
    pub fn with_count(
        store: Arc<dyn DocumentStore>,
        identity: Arc<dyn IdentitySource>,
        count: usize,
    ) -> Self {
        Self {
            store,
            identity,
            count,
        }
    }

    /// Seed the configured number of patients.
    ///
    /// A failed record (identity fetch, duplicate query, or write) is
    /// logged and does not stop the run.
    #[instrument(skip(self), fields(count = self.count))]
    pub async fn run(&self) -> RunSummary {
        let mut summary = RunSummary::default();

        for _ in 0..self.count {
            match self.seed_one().await {
                Ok(Some(patient_id)) => {
                    info!(patient_id = %patient_id, "Patient created");
                    summary.written += 1;
                }
                Ok(None) => summary.skipped += 1,
                Err(e) => {
                    error!(error = %e, "Failed to seed patient");
                    summary.failed += 1;
                }
            }
        }

        info!(
            created = summary.written,
            skipped = summary.skipped,
            failed = summary.failed,
            "Patient seeding finished"
        );

        summary
    }

    /// Fetch, map, and insert one patient.
    ///
    /// Returns the new patient code, or `None` when an existing patient
    /// already carries the same full name.
    async fn seed_one(&self) -> Result<Option<String>, OpsError> {
        let profile = self.identity.fetch_profile().await?;

        if self.name_exists(&profile.first_name, &profile.last_name).await? {
            info!(
                first_name = %profile.first_name,
                last_name = %profile.last_name,
                "Patient already exists, skipping"
            );
            return Ok(None);
        }

        let patient = Self::build_patient(profile);
        let fields = crate::to_field_map(&patient)?;
        self.store
            .set_document(PATIENTS_COLLECTION, &patient.id, fields)
            .await?;

        Ok(Some(patient.id))
    }

    /// Map an identity profile into a fresh patient record.
    fn build_patient(profile: PersonProfile) -> Patient {
        Patient {
            id: patient_id::generate(),
            first_name: profile.first_name,
            last_name: profile.last_name,
            date_of_birth: profile.date_of_birth,
            address: profile.address,
            extra_info: None,
            caregivers: DEFAULT_CAREGIVERS
                .iter()
                .map(|caregiver| caregiver.to_string())
                .collect(),
            search_keywords: None,
        }
    }

    /// Check whether a patient with the same full name already exists.
    async fn name_exists(&self, first_name: &str, last_name: &str) -> Result<bool, OpsError> {
        let matches = self
            .store
            .find_by_fields(
                PATIENTS_COLLECTION,
                &[
                    ("firstName", json!(first_name)),
                    ("lastName", json!(last_name)),
                ],
            )
            .await?;

        Ok(!matches.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use care_registry_store::MemoryStore;
    use chrono::NaiveDate;
    use std::collections::VecDeque;
    use tokio::sync::Mutex;

    /// Identity source that replays a fixed script of responses.
    struct ScriptedIdentitySource {
        responses: Mutex<VecDeque<Result<PersonProfile, OpsError>>>,
    }

    impl ScriptedIdentitySource {
        fn new(responses: Vec<Result<PersonProfile, OpsError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
            }
        }
    }

    #[async_trait]
    impl IdentitySource for ScriptedIdentitySource {
        async fn fetch_profile(&self) -> Result<PersonProfile, OpsError> {
            self.responses
                .lock()
                .await
                .pop_front()
                .unwrap_or_else(|| Err(OpsError::identity("script exhausted")))
        }
    }

    fn profile(first_name: &str, last_name: &str) -> PersonProfile {
        PersonProfile {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1984, 3, 20).unwrap(),
            address: "8929 Rue Abel, 69003, Lyon".to_string(),
        }
    }

    fn seeder_with_script(
        store: Arc<MemoryStore>,
        responses: Vec<Result<PersonProfile, OpsError>>,
    ) -> PatientSeeder {
        let count = responses.len();
        PatientSeeder::with_count(
            store,
            Arc::new(ScriptedIdentitySource::new(responses)),
            count,
        )
    }

    #[tokio::test]
    async fn test_seeds_distinct_patients() {
        let store = Arc::new(MemoryStore::new());
        let seeder = seeder_with_script(
            store.clone(),
            vec![
                Ok(profile("Marie", "Curie")),
                Ok(profile("Jean", "Dupont")),
                Ok(profile("Amandine", "Roux")),
            ],
        );

        let summary = seeder.run().await;

        assert_eq!(summary.written, 3);
        assert_eq!(summary.skipped, 0);
        assert_eq!(summary.failed, 0);
        assert_eq!(store.snapshot(PATIENTS_COLLECTION).await.len(), 3);
    }

    #[tokio::test]
    async fn test_duplicate_names_are_skipped() {
        let store = Arc::new(MemoryStore::new());
        let seeder = seeder_with_script(
            store.clone(),
            vec![
                Ok(profile("Marie", "Curie")),
                Ok(profile("Marie", "Curie")),
                Ok(profile("Marie", "Curie")),
            ],
        );

        let summary = seeder.run().await;

        assert_eq!(summary.written, 1);
        assert_eq!(summary.skipped, 2);
        assert_eq!(store.snapshot(PATIENTS_COLLECTION).await.len(), 1);
    }

    #[tokio::test]
    async fn test_same_first_name_alone_is_not_a_duplicate() {
        let store = Arc::new(MemoryStore::new());
        let seeder = seeder_with_script(
            store.clone(),
            vec![
                Ok(profile("Marie", "Curie")),
                Ok(profile("Marie", "Dupont")),
            ],
        );

        let summary = seeder.run().await;

        assert_eq!(summary.written, 2);
        assert_eq!(summary.skipped, 0);
    }

    #[tokio::test]
    async fn test_identity_failure_does_not_stop_the_run() {
        let store = Arc::new(MemoryStore::new());
        let seeder = seeder_with_script(
            store.clone(),
            vec![
                Ok(profile("Marie", "Curie")),
                Err(OpsError::identity("connection reset")),
                Ok(profile("Jean", "Dupont")),
            ],
        );

        let summary = seeder.run().await;

        assert_eq!(summary.written, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(store.snapshot(PATIENTS_COLLECTION).await.len(), 2);
    }

    #[tokio::test]
    async fn test_seeded_patient_has_expected_shape() {
        let store = Arc::new(MemoryStore::new());
        let seeder = seeder_with_script(store.clone(), vec![Ok(profile("Marie", "Curie"))]);

        seeder.run().await;

        let snapshot = store.snapshot(PATIENTS_COLLECTION).await;
        let document = &snapshot[0];

        // The document key is the nine-character patient code, repeated in
        // the id field.
        assert_eq!(document.key.len(), 9);
        assert_eq!(document.str_field("id"), Some(document.key.as_str()));
        assert_eq!(document.str_field("firstName"), Some("Marie"));
        assert_eq!(document.str_field("lastName"), Some("Curie"));
        assert_eq!(document.str_field("dateOfBirth"), Some("1984-03-20"));
        assert_eq!(
            document.str_field("address"),
            Some("8929 Rue Abel, 69003, Lyon")
        );
        assert_eq!(document.fields["extraInfo"], serde_json::Value::Null);
        assert_eq!(
            document.fields["caregivers"],
            json!(["YqIMZG0vYPeGdc9yzRnK9SkTiEi1"])
        );
        assert!(document.fields.get("searchKeywords").is_none());
    }

    #[tokio::test]
    async fn test_default_count_is_thirty() {
        let store = Arc::new(MemoryStore::new());
        let seeder = PatientSeeder::new(
            store,
            Arc::new(ScriptedIdentitySource::new(Vec::new())),
        );

        // Every fetch fails once the script is exhausted; the run must
        // still attempt exactly the default count.
        let summary = seeder.run().await;

        assert_eq!(summary.total(), SEED_COUNT);
        assert_eq!(summary.failed, SEED_COUNT);
    }
}
