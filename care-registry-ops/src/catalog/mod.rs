//! Care-item catalog loading.
//!
//! Upserts the fixed catalog of care-item reference records in one atomic
//! batch. Document keys are derived from the item labels, so a re-run
//! rewrites the same documents instead of creating duplicates and no
//! separate duplicate check is needed.

use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::errors::OpsError;
use crate::summary::RunSummary;
use care_registry_shared::CareItem;
use care_registry_store::DocumentStore;

/// Collection holding the care-item reference records.
pub const CARE_ITEMS_COLLECTION: &str = "careItems";

/// The fixed care-item catalog, as (careType, name) pairs.
pub const CARE_ITEM_CATALOG: &[(&str, &str)] = &[
    ("Injection", "AAA"),
    ("Injection", "BBB"),
    ("Injection", "CCC"),
    ("Toilette", "DDD"),
    ("Toilette", "EEE"),
    ("Toilette", "FFF"),
    ("Soin", "III"),
    ("Soin", "JJJ"),
    ("Soin", "KKK"),
];

/// Loader that writes the care-item reference catalog.
pub struct CatalogLoader {
    store: Arc<dyn DocumentStore>,
}

impl CatalogLoader {
    /// Create a new catalog loader over the given store.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Upsert the built-in catalog in one atomic batch.
    ///
    /// All-or-nothing: if the commit fails nothing was written, the
    /// failure is logged, and no retry is attempted.
    #[instrument(skip(self))]
    pub async fn run(&self) -> RunSummary {
        let items: Vec<CareItem> = CARE_ITEM_CATALOG
            .iter()
            .map(|(care_type, name)| CareItem::new(*care_type, *name))
            .collect();

        match self.load(&items).await {
            Ok(count) => {
                info!(count = count, "Care item catalog committed");
                RunSummary {
                    written: count,
                    ..RunSummary::default()
                }
            }
            Err(e) => {
                error!(error = %e, "Failed to commit care item catalog");
                RunSummary {
                    failed: items.len(),
                    ..RunSummary::default()
                }
            }
        }
    }

    /// Serialize the items and commit them as one batch.
    async fn load(&self, items: &[CareItem]) -> Result<usize, OpsError> {
        let mut writes = Vec::with_capacity(items.len());
        for item in items {
            writes.push((item.id(), crate::to_field_map(item)?));
        }

        let count = writes.len();
        self.store.commit_batch(CARE_ITEMS_COLLECTION, writes).await?;

        Ok(count)
    }
}
