use std::net::SocketAddr;

use crate::provider::{Credentials, ProviderOrder};

#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Default provider order when a request does not supply one.
    pub provider_order: ProviderOrder,
    /// Process-wide provider credentials; per-request keys override these.
    pub credentials: Credentials,
    pub provider_timeout_secs: u64,
    /// Ceiling for a whole submit-then-poll lookup.
    pub poll_timeout_secs: u64,
    pub poll_max_attempts: u32,
    pub poll_interval_ms: u64,
    pub max_batch_size: usize,
    pub user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("provider_order", &self.provider_order)
            // Credentials' own Debug lists providers only, never secrets.
            .field("credentials", &self.credentials)
            .field("provider_timeout_secs", &self.provider_timeout_secs)
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .field("poll_max_attempts", &self.poll_max_attempts)
            .field("poll_interval_ms", &self.poll_interval_ms)
            .field("max_batch_size", &self.max_batch_size)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
