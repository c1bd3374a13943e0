use mailscout_core::{EnrichmentFailure, ErrorKind, ProviderId};
use thiserror::Error;

/// Errors raised inside a provider client before they are folded into an
/// [`mailscout_core::Outcome`].
///
/// Nothing outside this crate sees these: every adapter converts them with
/// [`ProviderError::to_failure`] at its trait boundary.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status.
    #[error("unexpected HTTP status {status}")]
    Status { status: u16 },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The credential is malformed or was refused during a token exchange.
    #[error("invalid credential: {0}")]
    InvalidCredential(String),

    /// An asynchronous provider job did not finish within the poll budget.
    #[error("job still pending after {attempts} polls")]
    PollExhausted { attempts: u32 },

    /// A multi-step lookup exceeded its overall time ceiling.
    #[error("lookup exceeded {secs}s ceiling")]
    Timeout { secs: u64 },

    /// The configured base URL is not usable.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl ProviderError {
    /// Failure kind this error maps to.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProviderError::Status { status: 401 | 403 } | ProviderError::InvalidCredential(_) => {
                ErrorKind::AuthError
            }
            ProviderError::Status { status: 429 } => ErrorKind::RateLimited,
            ProviderError::Http(_)
            | ProviderError::Status { .. }
            | ProviderError::Deserialize { .. }
            | ProviderError::PollExhausted { .. }
            | ProviderError::Timeout { .. }
            | ProviderError::InvalidBaseUrl { .. } => ErrorKind::UpstreamError,
        }
    }

    /// Converts this error into the caller-facing failure for `provider`.
    #[must_use]
    pub fn to_failure(&self, provider: ProviderId, linkedin_url: &str) -> EnrichmentFailure {
        let name = provider.display_name();
        let message = match self {
            ProviderError::Status { status: 401 | 403 } => format!("Invalid {name} API key"),
            ProviderError::Status { status: 429 } => format!("{name} rate limit exceeded"),
            ProviderError::Status { status } => format!("{name} API error (HTTP {status})"),
            ProviderError::Http(e) if e.is_timeout() => format!("{name} request timed out"),
            ProviderError::Http(e) if e.is_decode() => {
                format!("{name} returned an unexpected response")
            }
            ProviderError::Http(_) => format!("{name} API unavailable"),
            ProviderError::Deserialize { .. } => format!("{name} returned an unexpected response"),
            ProviderError::InvalidCredential(_) => format!("Invalid {name} API credentials"),
            ProviderError::PollExhausted { attempts } => {
                format!("{name} lookup did not complete after {attempts} polls")
            }
            ProviderError::Timeout { .. } => format!("{name} request timed out"),
            ProviderError::InvalidBaseUrl { .. } => format!("{name} is misconfigured"),
        };
        EnrichmentFailure::new(self.kind(), message, Some(linkedin_url))
    }
}
