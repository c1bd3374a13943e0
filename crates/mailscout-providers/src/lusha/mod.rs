//! Lusha person API client.

mod response;

use async_trait::async_trait;
use mailscout_core::{Outcome, PersonInput, ProviderId};
use reqwest::Client;

use crate::adapter::ProviderAdapter;
use crate::error::ProviderError;
use crate::http::{build_client, normalize_base_url, read_json, HttpSettings};

use response::{parse_person, PersonResponse};

const DEFAULT_BASE_URL: &str = "https://api.lusha.com";

pub struct LushaClient {
    client: Client,
    base_url: String,
}

impl LushaClient {
    /// Creates a client pointed at the production Lusha API.
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

    async fn person(&self, person: &PersonInput, api_key: &str) -> Result<Outcome, ProviderError> {
        let mut params: Vec<(&str, String)> = vec![
            ("revealEmails", "true".to_owned()),
            ("revealPhones", "false".to_owned()),
            ("linkedinUrl", person.linkedin_url.clone()),
        ];
        let (first, last) = person.name_parts();
        if let Some(first) = first {
            params.push(("firstName", first));
        }
        if let Some(last) = last {
            params.push(("lastName", last));
        }
        if let Some(company) = person.company() {
            params.push(("company", company.to_owned()));
        }

        let response = self
            .client
            .get(format!("{}/v2/person", self.base_url))
            .header("api_key", api_key)
            .query(&params)
            .send()
            .await?;
        let body: PersonResponse = read_json(response, "lusha v2/person").await?;
        Ok(parse_person(body, &person.linkedin_url))
    }
}

#[async_trait]
impl ProviderAdapter for LushaClient {
    fn id(&self) -> ProviderId {
        ProviderId::Lusha
    }

    async fn enrich(&self, person: &PersonInput, credential: &str) -> Outcome {
        match self.person(person, credential).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::debug!(
                    provider = "lusha",
                    linkedin_url = %person.linkedin_url,
                    error = %e,
                    "person lookup failed"
                );
                e.to_failure(ProviderId::Lusha, &person.linkedin_url).into()
            }
        }
    }
}
