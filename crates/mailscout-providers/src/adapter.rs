//! The narrow contract between the waterfall and each data provider.
//!
//! Adapters never fail in the `Result` sense: transport problems, rejected
//! credentials and empty matches all come back as an
//! [`Outcome::Failure`](mailscout_core::Outcome::Failure).

use async_trait::async_trait;
use mailscout_core::{Outcome, PersonInput, ProviderId};

#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Identifier this adapter answers for.
    fn id(&self) -> ProviderId;

    /// Look up one person with the given credential.
    async fn enrich(&self, person: &PersonInput, credential: &str) -> Outcome;
}

/// A provider with a native multi-person endpoint.
#[async_trait]
pub trait BatchProviderAdapter: ProviderAdapter {
    /// Look up many people in one call.
    ///
    /// The result has exactly `people.len()` entries and entry `i` belongs to
    /// `people[i]`. On a total provider failure every entry is a failure.
    async fn enrich_batch(&self, people: &[PersonInput], credential: &str) -> Vec<Outcome>;
}
