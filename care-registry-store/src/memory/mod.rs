//! In-memory implementation of the document store.
//!
//! Backs tests and local dry runs. Semantics mirror the Firestore
//! backend: full-document sets, merge on partial updates (creating the
//! document if absent), and all-or-nothing batches.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::errors::StoreError;
use crate::interfaces::DocumentStore;
use crate::types::{FieldMap, StoredDocument};

/// In-memory document store.
///
/// Collections are nested ordered maps behind an async lock, so scans and
/// snapshots come back in stable key order.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<BTreeMap<String, BTreeMap<String, FieldMap>>>,
}

impl MemoryStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot one collection's documents in key order.
    ///
    /// Test helper; an absent collection snapshots as empty.
    pub async fn snapshot(&self, collection: &str) -> Vec<StoredDocument> {
        let collections = self.collections.read().await;

        collections
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .map(|(key, fields)| StoredDocument::new(key.clone(), fields.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn set_document(
        &self,
        collection: &str,
        key: &str,
        fields: FieldMap,
    ) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;

        collections
            .entry(collection.to_string())
            .or_default()
            .insert(key.to_string(), fields);

        Ok(())
    }

    async fn commit_batch(
        &self,
        collection: &str,
        writes: Vec<(String, FieldMap)>,
    ) -> Result<(), StoreError> {
        // One write lock for the whole batch keeps it atomic.
        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection.to_string()).or_default();

        for (key, fields) in writes {
            documents.insert(key, fields);
        }

        Ok(())
    }

    async fn update_fields(
        &self,
        collection: &str,
        key: &str,
        fields: FieldMap,
    ) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let document = collections
            .entry(collection.to_string())
            .or_default()
            .entry(key.to_string())
            .or_default();

        for (name, value) in fields {
            document.insert(name, value);
        }

        Ok(())
    }

    async fn find_by_fields(
        &self,
        collection: &str,
        filters: &[(&str, Value)],
    ) -> Result<Vec<StoredDocument>, StoreError> {
        let collections = self.collections.read().await;

        let matches = collections
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|(_, fields)| {
                        filters
                            .iter()
                            .all(|(name, value)| fields.get(*name) == Some(value))
                    })
                    .map(|(key, fields)| StoredDocument::new(key.clone(), fields.clone()))
                    .collect()
            })
            .unwrap_or_default();

        Ok(matches)
    }

    async fn list_documents(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        Ok(self.snapshot(collection).await)
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}
