//! randomuser.me client implementation.
//!
//! Calls the public random identity API and maps one result into a
//! `PersonProfile`.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, error};

use crate::errors::OpsError;
use crate::identity::{IdentitySource, PersonProfile};

/// Default URL of the identity API.
pub const DEFAULT_API_URL: &str = "https://randomuser.me/api/";

/// Default nationality filter for generated identities. Keeps names and
/// addresses consistent with the application's locale.
pub const DEFAULT_NATIONALITY: &str = "fr";

/// Client for the randomuser.me identity API.
pub struct RandomUserClient {
    http: reqwest::Client,
    api_url: String,
    nationality: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    results: Vec<ApiResult>,
}

#[derive(Debug, Deserialize)]
struct ApiResult {
    name: ApiName,
    dob: ApiDateOfBirth,
    location: ApiLocation,
}

#[derive(Debug, Deserialize)]
struct ApiName {
    first: String,
    last: String,
}

#[derive(Debug, Deserialize)]
struct ApiDateOfBirth {
    date: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct ApiLocation {
    street: ApiStreet,
    city: String,
    postcode: ApiPostcode,
}

#[derive(Debug, Deserialize)]
struct ApiStreet {
    number: u32,
    name: String,
}

/// Postcodes arrive as strings or numbers depending on the nationality.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ApiPostcode {
    Text(String),
    Numeric(i64),
}

impl fmt::Display for ApiPostcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiPostcode::Text(text) => f.write_str(text),
            ApiPostcode::Numeric(number) => write!(f, "{}", number),
        }
    }
}

impl RandomUserClient {
    /// Create a new client against the public API with the default
    /// nationality filter.
    pub fn new() -> Self {
        Self::with_api(DEFAULT_API_URL, DEFAULT_NATIONALITY)
    }

    /// Create a new client against a specific endpoint and nationality.
    pub fn with_api(api_url: impl Into<String>, nationality: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.into(),
            nationality: nationality.into(),
        }
    }

    /// Pick the single result out of a response payload. An empty
    /// `results` array is a parse error.
    fn first_result(payload: ApiResponse) -> Result<ApiResult, OpsError> {
        payload
            .results
            .into_iter()
            .next()
            .ok_or_else(|| OpsError::parse("identity response carried no results"))
    }

    /// Map one API result into a person profile.
    ///
    /// The address keeps the application's display format:
    /// `{number} {street}, {postcode}, {city}`.
    fn map_result(result: ApiResult) -> PersonProfile {
        let address = format!(
            "{} {}, {}, {}",
            result.location.street.number,
            result.location.street.name,
            result.location.postcode,
            result.location.city,
        );

        PersonProfile {
            first_name: result.name.first,
            last_name: result.name.last,
            date_of_birth: result.dob.date.date_naive(),
            address,
        }
    }
}

impl Default for RandomUserClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentitySource for RandomUserClient {
    async fn fetch_profile(&self) -> Result<PersonProfile, OpsError> {
        let response = self
            .http
            .get(&self.api_url)
            .query(&[("nat", self.nationality.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Identity request failed");
            return Err(OpsError::identity(format!(
                "Identity request failed with status {}: {}",
                status, error_body
            )));
        }

        let payload: ApiResponse = response
            .json()
            .await
            .map_err(|e| OpsError::parse(e.to_string()))?;

        let result = Self::first_result(payload)?;

        debug!(
            first_name = %result.name.first,
            last_name = %result.name.last,
            "Fetched identity"
        );

        Ok(Self::map_result(result))
    }
}
