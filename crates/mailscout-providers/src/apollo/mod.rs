//! Apollo people-match client. Apollo is the batch-capable provider.

mod response;

use async_trait::async_trait;
use mailscout_core::{Outcome, PersonInput, ProviderId};
use reqwest::Client;

use crate::adapter::{BatchProviderAdapter, ProviderAdapter};
use crate::error::ProviderError;
use crate::http::{build_client, normalize_base_url, read_json, HttpSettings};

use response::{
    parse_bulk_match, parse_match, BulkMatchRequest, BulkMatchResponse, MatchDetails,
    MatchResponse,
};

const DEFAULT_BASE_URL: &str = "https://api.apollo.io/api/v1";

/// Client for Apollo's `people/match` and `people/bulk_match` endpoints.
///
/// The API key is supplied per call so one client serves every credential.
pub struct ApolloClient {
    client: Client,
    base_url: String,
}

impl ApolloClient {
    /// Creates a client pointed at the production Apollo API.
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
    /// Returns [`ProviderError::Http`] if the HTTP client cannot be constructed,
    /// or [`ProviderError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(settings: &HttpSettings, base_url: &str) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_client(settings)?,
            base_url: normalize_base_url(base_url)?,
        })
    }

    async fn match_person(
        &self,
        person: &PersonInput,
        api_key: &str,
    ) -> Result<Outcome, ProviderError> {
        let response = self
            .client
            .post(format!("{}/people/match", self.base_url))
            .header("X-Api-Key", api_key)
            .header("Cache-Control", "no-cache")
            .json(&MatchDetails::from_person(person))
            .send()
            .await?;
        let body: MatchResponse = read_json(response, "apollo people/match").await?;
        Ok(parse_match(body, &person.linkedin_url))
    }

    async fn bulk_match(
        &self,
        people: &[PersonInput],
        api_key: &str,
    ) -> Result<Vec<Outcome>, ProviderError> {
        let request = BulkMatchRequest {
            details: people.iter().map(MatchDetails::from_person).collect(),
            reveal_personal_emails: true,
        };
        let response = self
            .client
            .post(format!("{}/people/bulk_match", self.base_url))
            .header("X-Api-Key", api_key)
            .header("Cache-Control", "no-cache")
            .json(&request)
            .send()
            .await?;
        let body: BulkMatchResponse = read_json(response, "apollo people/bulk_match").await?;
        Ok(parse_bulk_match(body, people))
    }
}

#[async_trait]
impl ProviderAdapter for ApolloClient {
    fn id(&self) -> ProviderId {
        ProviderId::Apollo
    }

    async fn enrich(&self, person: &PersonInput, credential: &str) -> Outcome {
        match self.match_person(person, credential).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::debug!(
                    provider = "apollo",
                    linkedin_url = %person.linkedin_url,
                    error = %e,
                    "match failed"
                );
                e.to_failure(ProviderId::Apollo, &person.linkedin_url).into()
            }
        }
    }
}

#[async_trait]
impl BatchProviderAdapter for ApolloClient {
    async fn enrich_batch(&self, people: &[PersonInput], credential: &str) -> Vec<Outcome> {
        if people.is_empty() {
            return Vec::new();
        }
        match self.bulk_match(people, credential).await {
            Ok(outcomes) => outcomes,
            Err(e) => {
                tracing::warn!(
                    provider = "apollo",
                    batch = people.len(),
                    error = %e,
                    "bulk match failed"
                );
                people
                    .iter()
                    .map(|p| e.to_failure(ProviderId::Apollo, &p.linkedin_url).into())
                    .collect()
            }
        }
    }
}
