//! Sequential provider fallback for a single person.

use mailscout_core::{
    AppConfig, Credentials, ErrorKind, Outcome, PersonInput, ProviderId, ProviderOrder,
};
use mailscout_providers::ProviderRegistry;
use serde::Serialize;

use crate::credentials::resolve;

pub(crate) const NO_PROVIDER_MESSAGE: &str = "No providers available or all providers failed";
const MISSING_URL_MESSAGE: &str = "linkedin_url is required";

const DEFAULT_MAX_BATCH_SIZE: usize = 10;

/// The enrichment engine: a provider registry plus process defaults.
///
/// Holds no mutable state, so one instance can be shared across tasks.
#[derive(Debug, Clone)]
pub struct Waterfall {
    pub(crate) registry: ProviderRegistry,
    pub(crate) defaults: Credentials,
    pub(crate) default_order: ProviderOrder,
    pub(crate) max_batch_size: usize,
}

/// One adapter invocation and what it returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderAttempt {
    pub provider: ProviderId,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Neither the request nor the process supplied a secret.
    NoCredential,
    /// The name is not a provider this build has an adapter for.
    UnknownProvider,
}

/// An order entry that was passed over without calling anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedProvider {
    pub name: String,
    pub reason: SkipReason,
}

/// The primary outcome plus how it was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WaterfallReport {
    pub outcome: Outcome,
    pub attempts: Vec<ProviderAttempt>,
    pub skipped: Vec<SkippedProvider>,
}

impl Waterfall {
    #[must_use]
    pub fn new(registry: ProviderRegistry, defaults: Credentials, default_order: ProviderOrder) -> Self {
        Self {
            registry,
            defaults,
            default_order,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }

    /// Builds an engine from loaded configuration.
    #[must_use]
    pub fn from_config(registry: ProviderRegistry, config: &AppConfig) -> Self {
        Self::new(
            registry,
            config.credentials.clone(),
            config.provider_order.clone(),
        )
        .with_max_batch_size(config.max_batch_size)
    }

    #[must_use]
    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = max_batch_size;
        self
    }

    #[must_use]
    pub fn default_order(&self) -> &ProviderOrder {
        &self.default_order
    }

    #[must_use]
    pub fn defaults(&self) -> &Credentials {
        &self.defaults
    }

    #[must_use]
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    #[must_use]
    pub fn max_batch_size(&self) -> usize {
        self.max_batch_size
    }

    /// A non-empty override replaces the default order outright.
    pub(crate) fn effective_order<'a>(
        &'a self,
        order: Option<&'a ProviderOrder>,
    ) -> &'a ProviderOrder {
        order
            .filter(|o| !o.is_empty())
            .unwrap_or(&self.default_order)
    }

    /// Enriches one person, stopping at the first provider that finds an email.
    ///
    /// Never fails: when nothing succeeds the last provider's failure is
    /// returned, or a not-found failure if no provider was attempted.
    pub async fn enrich_one(
        &self,
        person: &PersonInput,
        overrides: Option<&Credentials>,
        order: Option<&ProviderOrder>,
    ) -> Outcome {
        self.enrich_one_with_report(person, overrides, order)
            .await
            .outcome
    }

    /// Like [`Waterfall::enrich_one`], also reporting every attempt and skip.
    pub async fn enrich_one_with_report(
        &self,
        person: &PersonInput,
        overrides: Option<&Credentials>,
        order: Option<&ProviderOrder>,
    ) -> WaterfallReport {
        let mut attempts = Vec::new();
        let mut skipped = Vec::new();

        if !person.has_profile_url() {
            return WaterfallReport {
                outcome: Outcome::failure(ErrorKind::ValidationError, MISSING_URL_MESSAGE, None),
                attempts,
                skipped,
            };
        }

        let linkedin_url = person.linkedin_url.as_str();
        for name in self.effective_order(order).names() {
            let Ok(provider) = name.parse::<ProviderId>() else {
                tracing::warn!(provider = name, "skipping unknown provider");
                skipped.push(SkippedProvider {
                    name: name.to_owned(),
                    reason: SkipReason::UnknownProvider,
                });
                continue;
            };

            let Some(credential) = resolve(provider, overrides, &self.defaults) else {
                tracing::debug!(%provider, "skipping provider: no credential");
                skipped.push(SkippedProvider {
                    name: name.to_owned(),
                    reason: SkipReason::NoCredential,
                });
                continue;
            };

            let Some(adapter) = self.registry.get(provider) else {
                tracing::warn!(%provider, "skipping provider: no adapter registered");
                skipped.push(SkippedProvider {
                    name: name.to_owned(),
                    reason: SkipReason::UnknownProvider,
                });
                continue;
            };

            tracing::info!(%provider, linkedin_url, "trying provider");
            let outcome = adapter.enrich(person, credential).await;
            attempts.push(ProviderAttempt {
                provider,
                outcome: outcome.clone(),
            });

            match &outcome {
                Outcome::Success(_) => {
                    tracing::info!(%provider, linkedin_url, "provider found email");
                    return WaterfallReport {
                        outcome,
                        attempts,
                        skipped,
                    };
                }
                Outcome::Failure(failure) => {
                    tracing::info!(
                        %provider,
                        linkedin_url,
                        error = %failure.error,
                        message = %failure.message,
                        "provider failed"
                    );
                }
            }
        }

        // Last failure wins.
        let outcome = attempts.last().map_or_else(
            || Outcome::failure(ErrorKind::NotFound, NO_PROVIDER_MESSAGE, Some(linkedin_url)),
            |attempt| attempt.outcome.clone(),
        );
        WaterfallReport {
            outcome,
            attempts,
            skipped,
        }
    }
}

#[cfg(test)]
#[path = "waterfall_test.rs"]
mod tests;
