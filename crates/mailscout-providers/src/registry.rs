//! Fixed table of provider identifiers to adapter implementations.

use std::collections::HashMap;
use std::sync::Arc;

use mailscout_core::ProviderId;

use crate::adapter::{BatchProviderAdapter, ProviderAdapter};
use crate::apollo::ApolloClient;
use crate::error::ProviderError;
use crate::http::HttpSettings;
use crate::lusha::LushaClient;
use crate::prospeo::ProspeoClient;
use crate::rocketreach::RocketReachClient;
use crate::snov::SnovClient;

/// Adapters available to the engine, built once at startup.
///
/// At most one adapter is registered per [`ProviderId`]; registering again
/// replaces the earlier one. At most one batch adapter is designated.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    adapters: HashMap<ProviderId, Arc<dyn ProviderAdapter>>,
    batch: Option<Arc<dyn BatchProviderAdapter>>,
}

impl ProviderRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the production HTTP client for every known provider, with
    /// Apollo as the batch provider.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if an HTTP client cannot be constructed.
    pub fn standard(settings: &HttpSettings) -> Result<Self, ProviderError> {
        Ok(Self::new()
            .with_batch(ApolloClient::new(settings)?)
            .with(RocketReachClient::new(settings)?)
            .with(LushaClient::new(settings)?)
            .with(ProspeoClient::new(settings)?)
            .with(SnovClient::new(settings)?))
    }

    /// Registers a single-person adapter.
    #[must_use]
    pub fn with<A>(mut self, adapter: A) -> Self
    where
        A: ProviderAdapter + 'static,
    {
        self.adapters.insert(adapter.id(), Arc::new(adapter));
        self
    }

    /// Registers `adapter` for single lookups and designates it the batch provider.
    #[must_use]
    pub fn with_batch<A>(mut self, adapter: A) -> Self
    where
        A: BatchProviderAdapter + 'static,
    {
        let adapter = Arc::new(adapter);
        self.adapters.insert(adapter.id(), Arc::clone(&adapter) as Arc<dyn ProviderAdapter>);
        self.batch = Some(adapter);
        self
    }

    #[must_use]
    pub fn get(&self, provider: ProviderId) -> Option<&Arc<dyn ProviderAdapter>> {
        self.adapters.get(&provider)
    }

    #[must_use]
    pub fn batch(&self) -> Option<&Arc<dyn BatchProviderAdapter>> {
        self.batch.as_ref()
    }

    /// Registered providers in a stable order.
    #[must_use]
    pub fn providers(&self) -> Vec<ProviderId> {
        let mut ids: Vec<ProviderId> = self.adapters.keys().copied().collect();
        ids.sort();
        ids
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.providers())
            .field("batch", &self.batch.as_ref().map(|b| b.id()))
            .finish()
    }
}
