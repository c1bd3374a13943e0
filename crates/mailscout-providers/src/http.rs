//! Shared HTTP plumbing for provider clients.

use std::time::Duration;

use mailscout_core::AppConfig;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::ProviderError;
use crate::poll::PollPolicy;

/// Transport settings shared by every provider client.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// Per-request timeout for single-shot calls.
    pub timeout: Duration,
    pub user_agent: String,
    /// Attempt budget and delay for submit-then-poll providers.
    pub poll: PollPolicy,
    /// Ceiling for an entire submit-then-poll lookup.
    pub poll_timeout: Duration,
}

impl HttpSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.provider_timeout_secs),
            user_agent: config.user_agent.clone(),
            poll: PollPolicy {
                max_attempts: config.poll_max_attempts,
                interval: Duration::from_millis(config.poll_interval_ms),
            },
            poll_timeout: Duration::from_secs(config.poll_timeout_secs),
        }
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: "mailscout/0.1 (contact-enrichment)".to_owned(),
            poll: PollPolicy::default(),
            poll_timeout: Duration::from_secs(120),
        }
    }
}

/// Builds the `reqwest` client used by one provider.
///
/// # Errors
///
/// Returns [`ProviderError::Http`] if the client cannot be constructed.
pub(crate) fn build_client(settings: &HttpSettings) -> Result<Client, ProviderError> {
    let client = Client::builder()
        .timeout(settings.timeout)
        .connect_timeout(Duration::from_secs(10))
        .user_agent(settings.user_agent.as_str())
        .build()?;
    Ok(client)
}

/// Validates `base_url` and strips trailing slashes so endpoint paths can be
/// appended with a single `/`.
///
/// # Errors
///
/// Returns [`ProviderError::InvalidBaseUrl`] if `base_url` does not parse.
pub(crate) fn normalize_base_url(base_url: &str) -> Result<String, ProviderError> {
    let trimmed = base_url.trim_end_matches('/');
    Url::parse(trimmed).map_err(|e| ProviderError::InvalidBaseUrl {
        url: base_url.to_owned(),
        reason: e.to_string(),
    })?;
    Ok(trimmed.to_owned())
}

/// Asserts a 2xx status and deserializes the body.
///
/// # Errors
///
/// - [`ProviderError::Status`] for any non-2xx status.
/// - [`ProviderError::Http`] if the body cannot be read.
/// - [`ProviderError::Deserialize`] if the body does not match `T`.
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
    context: &str,
) -> Result<T, ProviderError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::Status {
            status: status.as_u16(),
        });
    }
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ProviderError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}
