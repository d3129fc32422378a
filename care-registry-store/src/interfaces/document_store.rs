//! Document store trait definition.
//!
//! This module defines the abstract interface for document database
//! operations, allowing for different backend implementations (Firestore,
//! in-memory, etc.).

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::StoreError;
use crate::types::{FieldMap, StoredDocument};

/// Abstracts the underlying document database (Firestore, in-memory, etc.).
///
/// This trait defines the interface the maintenance operations run
/// against. Implementations are injected into the operations to enable
/// dependency injection and easy testing with in-memory stores.
///
/// All methods return `Result<T, StoreError>` for consistent error
/// handling across backend implementations.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Write a single document, replacing it entirely if it already exists.
    ///
    /// # Arguments
    ///
    /// * `collection` - The collection holding the document
    /// * `key` - The document key within the collection
    /// * `fields` - The full set of fields to store
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the document was written successfully
    /// * `Err(StoreError)` - If the write fails
    async fn set_document(
        &self,
        collection: &str,
        key: &str,
        fields: FieldMap,
    ) -> Result<(), StoreError>;

    /// Commit a batch of document writes atomically.
    ///
    /// Either every write in the batch is applied or none of them is.
    /// Writes replace existing documents with the same key, so a repeated
    /// commit of the same batch is a no-op in effect.
    ///
    /// # Arguments
    ///
    /// * `collection` - The collection holding the documents
    /// * `writes` - Pairs of document key and full field set
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the whole batch was committed
    /// * `Err(StoreError)` - If the commit fails; nothing was written
    async fn commit_batch(
        &self,
        collection: &str,
        writes: Vec<(String, FieldMap)>,
    ) -> Result<(), StoreError>;

    /// Update only the given fields of a document, leaving the rest alone.
    ///
    /// Mirrors the merge semantics of the Firestore backend: fields not
    /// named in `fields` keep their stored values, and the document is
    /// created if it does not exist.
    ///
    /// # Arguments
    ///
    /// * `collection` - The collection holding the document
    /// * `key` - The document key within the collection
    /// * `fields` - The fields to set; everything else is untouched
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the update was applied
    /// * `Err(StoreError)` - If the update fails
    async fn update_fields(
        &self,
        collection: &str,
        key: &str,
        fields: FieldMap,
    ) -> Result<(), StoreError>;

    /// Find documents whose fields equal the given values.
    ///
    /// All filters must match (logical AND). An empty filter list behaves
    /// like [`DocumentStore::list_documents`].
    ///
    /// # Arguments
    ///
    /// * `collection` - The collection to search
    /// * `filters` - Pairs of field path and expected value
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<StoredDocument>)` - The matching documents, possibly empty
    /// * `Err(StoreError)` - If the query fails
    async fn find_by_fields(
        &self,
        collection: &str,
        filters: &[(&str, Value)],
    ) -> Result<Vec<StoredDocument>, StoreError>;

    /// List every document in a collection.
    ///
    /// # Arguments
    ///
    /// * `collection` - The collection to scan
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<StoredDocument>)` - All documents in the collection
    /// * `Err(StoreError)` - If the scan fails
    async fn list_documents(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError>;

    /// Check if the document store is reachable and accepting requests.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the store answered
    /// * `Ok(false)` - If the store answered but reported a problem
    /// * `Err(StoreError)` - If the check could not be performed
    async fn health_check(&self) -> Result<bool, StoreError>;
}
