//! RocketReach person lookup client.

mod response;

use async_trait::async_trait;
use mailscout_core::{ErrorKind, Outcome, PersonInput, ProviderId};
use reqwest::{Client, StatusCode};

use crate::adapter::ProviderAdapter;
use crate::error::ProviderError;
use crate::http::{build_client, normalize_base_url, read_json, HttpSettings};

use response::{parse_lookup, LookupResponse};

const DEFAULT_BASE_URL: &str = "https://api.rocketreach.co/api/v2";

pub struct RocketReachClient {
    client: Client,
    base_url: String,
}

impl RocketReachClient {
    /// Creates a client pointed at the production RocketReach API.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the HTTP client cannot be constructed.
    pub fn new(settings: &HttpSettings) -> Result<Self, ProviderError> {
        Self::with_base_url(settings, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] or [`ProviderError::InvalidBaseUrl`].
    pub fn with_base_url(settings: &HttpSettings, base_url: &str) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_client(settings)?,
            base_url: normalize_base_url(base_url)?,
        })
    }

    async fn lookup(&self, person: &PersonInput, api_key: &str) -> Result<Outcome, ProviderError> {
        let mut params: Vec<(&str, String)> = vec![("linkedin_url", person.linkedin_url.clone())];
        if let Some(name) = person.full_name() {
            params.push(("name", name));
        }
        if let Some(company) = person.company() {
            params.push(("current_employer", company.to_owned()));
        }

        let response = self
            .client
            .get(format!("{}/person/lookup", self.base_url))
            .header("Api-Key", api_key)
            .query(&params)
            .send()
            .await?;
        // RocketReach answers an unknown profile with 404 rather than an empty body.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Outcome::failure(
                ErrorKind::NotFound,
                "Person not found in RocketReach",
                Some(person.linkedin_url.as_str()),
            ));
        }
        let body: LookupResponse = read_json(response, "rocketreach person/lookup").await?;
        Ok(parse_lookup(body, &person.linkedin_url))
    }
}

#[async_trait]
impl ProviderAdapter for RocketReachClient {
    fn id(&self) -> ProviderId {
        ProviderId::RocketReach
    }

    async fn enrich(&self, person: &PersonInput, credential: &str) -> Outcome {
        match self.lookup(person, credential).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::debug!(
                    provider = "rocketreach",
                    linkedin_url = %person.linkedin_url,
                    error = %e,
                    "lookup failed"
                );
                e.to_failure(ProviderId::RocketReach, &person.linkedin_url).into()
            }
        }
    }
}
