//! Firestore implementation of the document store.
//!
//! This module provides a concrete implementation of `DocumentStore`
//! using the Firestore REST API as the backend.

mod client;
mod queries;
mod values;

pub use client::FirestoreClient;
