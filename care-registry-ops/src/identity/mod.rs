//! Identity source abstraction.
//!
//! This module defines the abstract `IdentitySource` trait for fetching
//! synthetic person profiles, and the concrete client for the
//! randomuser.me API.

mod random_user;

pub use random_user::{RandomUserClient, DEFAULT_API_URL, DEFAULT_NATIONALITY};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::OpsError;

/// One synthetic person profile from the identity source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonProfile {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    /// Postal address already formatted for storage.
    pub address: String,
}

/// Abstracts the source of synthetic identities.
///
/// The production implementation calls the randomuser.me API; tests inject
/// scripted sources. One call yields one profile, and each call is
/// expected to produce a fresh identity.
#[async_trait]
pub trait IdentitySource: Send + Sync {
    /// Fetch a single synthetic person profile.
    ///
    /// # Returns
    ///
    /// * `Ok(PersonProfile)` - A freshly generated identity
    /// * `Err(OpsError)` - If the source is unreachable or its payload is unusable
    async fn fetch_profile(&self) -> Result<PersonProfile, OpsError>;
}
