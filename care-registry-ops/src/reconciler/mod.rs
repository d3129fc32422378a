//! Search keyword reconciliation.
//!
//! Scans the patient collection and rewrites each document's derived
//! `searchKeywords` list from its current name and id fields. Keywords are
//! a cache over those fields, so the reconciler is safe to re-run at any
//! time and after any by-hand edit.

use std::sync::Arc;

use serde_json::json;
use tracing::{error, info, instrument, warn};

use crate::errors::OpsError;
use crate::seeder::PATIENTS_COLLECTION;
use crate::summary::RunSummary;
use care_registry_shared::search_keywords;
use care_registry_store::{DocumentStore, FieldMap, StoredDocument};

/// Reconciler that recomputes the derived search keywords for every
/// patient document.
pub struct KeywordReconciler {
    store: Arc<dyn DocumentStore>,
}

impl KeywordReconciler {
    /// Create a new reconciler over the given store.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Recompute `searchKeywords` for every patient document.
    ///
    /// Documents missing a usable name are skipped with a warning, and a
    /// failed update is logged without stopping the scan. Only the
    /// keyword field is written; everything else in the document is left
    /// untouched.
    #[instrument(skip(self))]
    pub async fn run(&self) -> RunSummary {
        let documents = match self.store.list_documents(PATIENTS_COLLECTION).await {
            Ok(documents) => documents,
            Err(e) => {
                error!(error = %e, "Failed to scan patient collection");
                return RunSummary::default();
            }
        };

        let mut summary = RunSummary::default();
        for document in &documents {
            match self.reconcile_document(document).await {
                Ok(true) => summary.written += 1,
                Ok(false) => summary.skipped += 1,
                Err(e) => {
                    error!(
                        key = %document.key,
                        error = %e,
                        "Failed to update search keywords"
                    );
                    summary.failed += 1;
                }
            }
        }

        info!(
            updated = summary.written,
            skipped = summary.skipped,
            failed = summary.failed,
            "Search keyword reconciliation finished"
        );

        summary
    }

    /// Recompute and persist the keywords for one document.
    ///
    /// Returns `false` when the document was skipped for missing names.
    async fn reconcile_document(&self, document: &StoredDocument) -> Result<bool, OpsError> {
        let first_name = document.str_field("firstName").filter(|name| !name.is_empty());
        let last_name = document.str_field("lastName").filter(|name| !name.is_empty());

        let (first_name, last_name) = match (first_name, last_name) {
            (Some(first_name), Some(last_name)) => (first_name, last_name),
            _ => {
                warn!(key = %document.key, "Patient has no usable name fields, skipping");
                return Ok(false);
            }
        };

        // Records written by the seeder repeat their code in the id field;
        // anything older falls back to the document key, which carries the
        // same code.
        let id = document.str_field("id").unwrap_or(&document.key);
        let keywords = search_keywords(first_name, last_name, id);

        let mut update = FieldMap::new();
        update.insert("searchKeywords".to_string(), json!(keywords));
        self.store
            .update_fields(PATIENTS_COLLECTION, &document.key, update)
            .await?;

        info!(key = %document.key, "Search keywords updated");
        Ok(true)
    }
}
