//! Firestore REST client implementation.
//!
//! This module provides the concrete implementation of `DocumentStore`
//! using the Firestore REST API, the same surface the application's web
//! SDK talks to, authenticated with the project's web API key.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};
use url::Url;

use crate::errors::StoreError;
use crate::firestore::queries::{equality_query, scan_query};
use crate::firestore::values::{decode_fields, encode_fields};
use crate::interfaces::DocumentStore;
use crate::types::{FieldMap, StoredDocument};

/// Default base URL of the Firestore REST API.
pub const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com/v1";

/// Collection and key probed by health checks. The document is never
/// created; a clean 404 still proves the database answered the key.
const HEALTH_PROBE_PATH: &str = "_health/probe";

/// Firestore REST client implementation.
///
/// Talks to the project's default database over plain HTTPS. Writes go
/// through document `PATCH` requests and the atomic `:commit` endpoint,
/// reads through `:runQuery`.
///
/// # Example
///
/// ```ignore
/// use care_registry_store::FirestoreClient;
///
/// let client = FirestoreClient::new("my-project", "web-api-key")?;
/// let patients = client.list_documents("patients").await?;
/// ```
pub struct FirestoreClient {
    http: reqwest::Client,
    base_url: String,
    project_id: String,
    api_key: String,
}

impl FirestoreClient {
    /// Create a new client for a Firestore project.
    ///
    /// # Arguments
    ///
    /// * `project_id` - The Firebase project id
    /// * `api_key` - The project's web API key, sent with every request
    ///
    /// # Returns
    ///
    /// * `Ok(FirestoreClient)` - A new client instance
    /// * `Err(StoreError)` - If the endpoint URL cannot be built
    pub fn new(project_id: &str, api_key: &str) -> Result<Self, StoreError> {
        Self::with_base_url(DEFAULT_BASE_URL, project_id, api_key)
    }

    /// Create a new client against a non-default endpoint (e.g. the
    /// Firestore emulator).
    pub fn with_base_url(
        base_url: &str,
        project_id: &str,
        api_key: &str,
    ) -> Result<Self, StoreError> {
        let parsed_url =
            Url::parse(base_url).map_err(|e| StoreError::connection(e.to_string()))?;

        info!(
            url = %parsed_url,
            project_id = %project_id,
            "Created Firestore client"
        );

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: parsed_url.to_string().trim_end_matches('/').to_string(),
            project_id: project_id.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Resource path of the database's document root.
    fn documents_root(&self) -> String {
        format!(
            "projects/{}/databases/(default)/documents",
            self.project_id
        )
    }

    /// Full resource path of one document.
    ///
    /// Uses format: `projects/{project}/databases/(default)/documents/{collection}/{key}`.
    fn document_path(&self, collection: &str, key: &str) -> String {
        format!("{}/{}/{}", self.documents_root(), collection, key)
    }

    /// Build a request URL for a resource path, attaching the API key and
    /// any extra query parameters.
    fn request_url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, StoreError> {
        let mut url = Url::parse(&format!("{}/{}", self.base_url, path))
            .map_err(|e| StoreError::connection(e.to_string()))?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.api_key);
            for (name, value) in query {
                pairs.append_pair(name, value);
            }
        }

        Ok(url)
    }

    /// Run a structured query and decode the matching documents.
    async fn run_query(&self, body: Value) -> Result<Vec<StoredDocument>, StoreError> {
        let url = self.request_url(&format!("{}:runQuery", self.documents_root()), &[])?;

        let response = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Query request failed");
            return Err(StoreError::query(format!(
                "Query failed with status {}: {}",
                status, error_body
            )));
        }

        let results: Value = response
            .json()
            .await
            .map_err(|e| StoreError::decode(e.to_string()))?;

        Ok(Self::parse_query_results(&results))
    }

    /// Extract documents from a `runQuery` response body.
    ///
    /// The response is an array of result wrappers; entries carrying no
    /// `document` (read-time markers, empty results) are skipped.
    fn parse_query_results(results: &Value) -> Vec<StoredDocument> {
        let empty_vec = Vec::new();
        let entries = results.as_array().unwrap_or(&empty_vec);

        let mut documents = Vec::with_capacity(entries.len());
        for entry in entries {
            let name = entry
                .get("document")
                .and_then(|document| document.get("name"))
                .and_then(Value::as_str);
            let name = match name {
                Some(name) => name,
                None => continue,
            };

            let key = name.rsplit('/').next().unwrap_or(name).to_string();
            let fields = entry
                .get("document")
                .and_then(|document| document.get("fields"))
                .map(decode_fields)
                .unwrap_or_default();

            documents.push(StoredDocument::new(key, fields));
        }

        documents
    }
}

#[async_trait]
impl DocumentStore for FirestoreClient {
    /// Write a single document, replacing any existing content.
    ///
    /// A `PATCH` without an update mask replaces the whole document and
    /// creates it if it does not exist.
    async fn set_document(
        &self,
        collection: &str,
        key: &str,
        fields: FieldMap,
    ) -> Result<(), StoreError> {
        let url = self.request_url(&self.document_path(collection, key), &[])?;
        let body = json!({ "fields": encode_fields(&fields) });

        let response = self
            .http
            .patch(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Document write failed");
            return Err(StoreError::write(format!(
                "Write failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(collection = %collection, key = %key, "Document written");
        Ok(())
    }

    /// Commit a batch of full-document writes through the `:commit`
    /// endpoint. Firestore applies the whole batch atomically.
    async fn commit_batch(
        &self,
        collection: &str,
        writes: Vec<(String, FieldMap)>,
    ) -> Result<(), StoreError> {
        if writes.is_empty() {
            return Ok(());
        }

        let write_values: Vec<Value> = writes
            .iter()
            .map(|(key, fields)| {
                json!({
                    "update": {
                        "name": self.document_path(collection, key),
                        "fields": encode_fields(fields)
                    }
                })
            })
            .collect();

        let url = self.request_url(&format!("{}:commit", self.documents_root()), &[])?;
        let body = json!({ "writes": write_values });

        let response = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Batch commit failed");
            return Err(StoreError::batch_commit(format!(
                "Commit failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(collection = %collection, count = writes.len(), "Batch committed");
        Ok(())
    }

    /// Update only the named fields via a `PATCH` with an update mask.
    ///
    /// Fields outside the mask keep their stored values; the document is
    /// created if it does not exist.
    async fn update_fields(
        &self,
        collection: &str,
        key: &str,
        fields: FieldMap,
    ) -> Result<(), StoreError> {
        if fields.is_empty() {
            return Ok(());
        }

        let mask: Vec<(&str, &str)> = fields
            .keys()
            .map(|name| ("updateMask.fieldPaths", name.as_str()))
            .collect();

        let url = self.request_url(&self.document_path(collection, key), &mask)?;
        let body = json!({ "fields": encode_fields(&fields) });

        let response = self
            .http
            .patch(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Field update failed");
            return Err(StoreError::update(format!(
                "Update failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(collection = %collection, key = %key, "Document fields updated");
        Ok(())
    }

    async fn find_by_fields(
        &self,
        collection: &str,
        filters: &[(&str, Value)],
    ) -> Result<Vec<StoredDocument>, StoreError> {
        self.run_query(equality_query(collection, filters)).await
    }

    async fn list_documents(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        self.run_query(scan_query(collection)).await
    }

    /// Probe the database with a read of a document that never exists.
    ///
    /// A 404 is a healthy answer; it proves the endpoint resolved the
    /// project and accepted the API key.
    async fn health_check(&self) -> Result<bool, StoreError> {
        let url = self.request_url(
            &format!("{}/{}", self.documents_root(), HEALTH_PROBE_PATH),
            &[],
        )?;

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| StoreError::connection(e.to_string()))?;

        let status = response.status();
        if status.is_success() || status == reqwest::StatusCode::NOT_FOUND {
            return Ok(true);
        }

        let error_body = response.text().await.unwrap_or_default();
        warn!(status = %status, body = %error_body, "Health check rejected");
        Ok(false)
    }
}
