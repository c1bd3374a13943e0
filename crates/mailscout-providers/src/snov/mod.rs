//! Snov.io client.
//!
//! A lookup is three steps: exchange the `client_id:client_secret` credential
//! for a bearer token, start a profile task for the URL, then poll the task
//! until it completes. Polling is bounded by [`PollPolicy`] and the whole
//! sequence by [`HttpSettings::poll_timeout`].

mod response;

use std::time::Duration;

use async_trait::async_trait;
use mailscout_core::{Outcome, PersonInput, ProviderId};
use reqwest::Client;

use crate::adapter::ProviderAdapter;
use crate::error::ProviderError;
use crate::http::{build_client, normalize_base_url, read_json, HttpSettings};
use crate::poll::{poll_until_ready, PollPolicy, PollStatus};

use response::{
    parse_result, ResultResponse, StartRequest, StartResponse, TokenRequest, TokenResponse,
};

const DEFAULT_BASE_URL: &str = "https://api.snov.io";

pub struct SnovClient {
    client: Client,
    base_url: String,
    poll: PollPolicy,
    poll_timeout: Duration,
}

/// Splits `client_id:client_secret`. Exactly one separator, both halves non-blank.
fn split_credential(credential: &str) -> Result<(&str, &str), ProviderError> {
    let malformed = || ProviderError::InvalidCredential("expected client_id:client_secret".into());
    let (id, secret) = credential.split_once(':').ok_or_else(malformed)?;
    let (id, secret) = (id.trim(), secret.trim());
    if id.is_empty() || secret.is_empty() || secret.contains(':') {
        return Err(malformed());
    }
    Ok((id, secret))
}

impl SnovClient {
    /// Creates a client pointed at the production Snov.io API.
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
            poll: settings.poll,
            poll_timeout: settings.poll_timeout,
        })
    }

    /// Token refusals and tokenless answers are credential problems, not outages.
    async fn access_token(&self, credential: &str) -> Result<String, ProviderError> {
        let (client_id, client_secret) = split_credential(credential)?;
        let response = self
            .client
            .post(format!("{}/v1/oauth/access_token", self.base_url))
            .json(&TokenRequest {
                grant_type: "client_credentials",
                client_id,
                client_secret,
            })
            .send()
            .await?;

        let body: TokenResponse = match read_json(response, "snov access_token").await {
            Ok(body) => body,
            Err(ProviderError::Status { status }) => {
                return Err(ProviderError::InvalidCredential(format!(
                    "token exchange refused with HTTP {status}"
                )));
            }
            Err(e) => return Err(e),
        };
        body.access_token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ProviderError::InvalidCredential("no access token issued".into()))
    }

    async fn start_task(&self, token: &str, linkedin_url: &str) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(format!("{}/v2/li-profiles-by-urls/start", self.base_url))
            .bearer_auth(token)
            .json(&StartRequest {
                urls: [linkedin_url],
            })
            .send()
            .await?;
        let body: StartResponse = read_json(response, "snov li-profiles-by-urls/start").await?;
        body.into_task_hash().ok_or_else(|| ProviderError::Deserialize {
            context: "snov li-profiles-by-urls/start".to_owned(),
            source: <serde_json::Error as serde::de::Error>::missing_field("task_hash"),
        })
    }

    async fn task_status(
        &self,
        token: &str,
        task_hash: &str,
    ) -> Result<PollStatus<ResultResponse>, ProviderError> {
        let response = self
            .client
            .get(format!("{}/v2/li-profiles-by-urls/result", self.base_url))
            .bearer_auth(token)
            .query(&[("task_hash", task_hash)])
            .send()
            .await?;
        let body: ResultResponse = read_json(response, "snov li-profiles-by-urls/result").await?;
        if body.is_completed() {
            Ok(PollStatus::Ready(body))
        } else {
            Ok(PollStatus::Pending)
        }
    }

    async fn lookup(&self, person: &PersonInput, credential: &str) -> Result<Outcome, ProviderError> {
        let token = self.access_token(credential).await?;
        let task_hash = self.start_task(&token, &person.linkedin_url).await?;
        tracing::debug!(provider = "snov", task_hash = %task_hash, "profile task started");

        let (token, task_hash) = (token.as_str(), task_hash.as_str());
        let result = poll_until_ready(self.poll, move || self.task_status(token, task_hash)).await?;
        Ok(parse_result(result, &person.linkedin_url))
    }
}

#[async_trait]
impl ProviderAdapter for SnovClient {
    fn id(&self) -> ProviderId {
        ProviderId::Snov
    }

    async fn enrich(&self, person: &PersonInput, credential: &str) -> Outcome {
        let result = tokio::time::timeout(self.poll_timeout, self.lookup(person, credential))
            .await
            .unwrap_or_else(|_| {
                Err(ProviderError::Timeout {
                    secs: self.poll_timeout.as_secs(),
                })
            });
        match result {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::debug!(
                    provider = "snov",
                    linkedin_url = %person.linkedin_url,
                    error = %e,
                    "lookup failed"
                );
                e.to_failure(ProviderId::Snov, &person.linkedin_url).into()
            }
        }
    }
}
