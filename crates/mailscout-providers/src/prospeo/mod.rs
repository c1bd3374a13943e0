//! Prospeo enrich-person client.

mod response;

use async_trait::async_trait;
use mailscout_core::{Outcome, PersonInput, ProviderId};
use reqwest::Client;

use crate::adapter::ProviderAdapter;
use crate::error::ProviderError;
use crate::http::{build_client, normalize_base_url, read_json, HttpSettings};

use response::{parse_enrich, EnrichData, EnrichRequest, EnrichResponse};

const DEFAULT_BASE_URL: &str = "https://api.prospeo.io";

pub struct ProspeoClient {
    client: Client,
    base_url: String,
}

impl ProspeoClient {
    /// Creates a client pointed at the production Prospeo API.
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

    async fn enrich_person(
        &self,
        person: &PersonInput,
        api_key: &str,
    ) -> Result<Outcome, ProviderError> {
        let request = EnrichRequest {
            data: EnrichData {
                linkedin_url: &person.linkedin_url,
            },
        };
        let response = self
            .client
            .post(format!("{}/enrich-person", self.base_url))
            .header("X-KEY", api_key)
            .json(&request)
            .send()
            .await?;
        let body: EnrichResponse = read_json(response, "prospeo enrich-person").await?;
        Ok(parse_enrich(body, &person.linkedin_url))
    }
}

#[async_trait]
impl ProviderAdapter for ProspeoClient {
    fn id(&self) -> ProviderId {
        ProviderId::Prospeo
    }

    async fn enrich(&self, person: &PersonInput, credential: &str) -> Outcome {
        match self.enrich_person(person, credential).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::debug!(
                    provider = "prospeo",
                    linkedin_url = %person.linkedin_url,
                    error = %e,
                    "enrich-person failed"
                );
                e.to_failure(ProviderId::Prospeo, &person.linkedin_url).into()
            }
        }
    }
}
