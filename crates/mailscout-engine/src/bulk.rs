//! Many-person enrichment with a batch fast path.

use mailscout_core::{Credentials, EnrichmentFailure, ErrorKind, Outcome, PersonInput, ProviderOrder};
use thiserror::Error;

use crate::credentials::resolve;
use crate::waterfall::Waterfall;

/// Reasons a whole batch is refused before any provider is contacted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchRejected {
    #[error("Maximum {max} people per request (got {len})")]
    TooLarge { len: usize, max: usize },

    #[error("person at index {index} has no linkedin_url")]
    InvalidPerson { index: usize },
}

impl BatchRejected {
    /// The validation failure reported to callers for this rejection.
    #[must_use]
    pub fn to_failure(&self) -> EnrichmentFailure {
        EnrichmentFailure::new(ErrorKind::ValidationError, self.to_string(), None)
    }
}

impl Waterfall {
    /// Enriches `people`, returning one outcome per person in input order.
    ///
    /// When the batch provider is in the effective order and has a
    /// credential, everyone goes through one batch call first and only the
    /// failed positions are re-run through [`Waterfall::enrich_one`].
    /// Otherwise each person gets their own waterfall, one after another.
    ///
    /// # Errors
    ///
    /// - [`BatchRejected::TooLarge`] if `people` exceeds the configured maximum.
    /// - [`BatchRejected::InvalidPerson`] if any person has a blank profile URL.
    pub async fn enrich_many(
        &self,
        people: &[PersonInput],
        overrides: Option<&Credentials>,
        order: Option<&ProviderOrder>,
    ) -> Result<Vec<Outcome>, BatchRejected> {
        if people.len() > self.max_batch_size {
            return Err(BatchRejected::TooLarge {
                len: people.len(),
                max: self.max_batch_size,
            });
        }
        if let Some(index) = people.iter().position(|p| !p.has_profile_url()) {
            return Err(BatchRejected::InvalidPerson { index });
        }
        if people.is_empty() {
            return Ok(Vec::new());
        }

        let order = self.effective_order(order);
        let batch = self.registry.batch().and_then(|adapter| {
            let provider = adapter.id();
            if !order.contains(provider) {
                return None;
            }
            resolve(provider, overrides, &self.defaults).map(|credential| (adapter, credential))
        });

        let Some((adapter, credential)) = batch else {
            tracing::info!(batch = people.len(), "no batch provider available; enriching individually");
            let mut results = Vec::with_capacity(people.len());
            for person in people {
                results.push(self.enrich_one(person, overrides, Some(order)).await);
            }
            return Ok(results);
        };

        let provider = adapter.id();
        tracing::info!(%provider, batch = people.len(), "trying batch provider");
        let mut results = adapter.enrich_batch(people, credential).await;
        if results.len() != people.len() {
            tracing::warn!(
                %provider,
                expected = people.len(),
                got = results.len(),
                "batch result length mismatch"
            );
            results.truncate(people.len());
            let missing = people[results.len()..].iter().map(|p| {
                Outcome::failure(
                    ErrorKind::UpstreamError,
                    format!("{} returned no result for this person", provider.display_name()),
                    Some(p.linkedin_url.as_str()),
                )
            });
            results.extend(missing);
        }

        for (slot, person) in results.iter_mut().zip(people) {
            if slot.is_success() {
                continue;
            }
            tracing::info!(%provider, linkedin_url = %person.linkedin_url, "batch miss; running waterfall");
            *slot = self.enrich_one(person, overrides, Some(order)).await;
        }
        Ok(results)
    }
}

#[cfg(test)]
#[path = "bulk_test.rs"]
mod tests;
