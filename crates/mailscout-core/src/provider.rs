use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Third-party data sources the waterfall knows how to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Apollo,
    RocketReach,
    Lusha,
    Prospeo,
    Snov,
}

impl ProviderId {
    pub const ALL: [ProviderId; 5] = [
        ProviderId::Apollo,
        ProviderId::RocketReach,
        ProviderId::Lusha,
        ProviderId::Prospeo,
        ProviderId::Snov,
    ];

    /// Wire identifier used in configuration and request bodies.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderId::Apollo => "apollo",
            ProviderId::RocketReach => "rocketreach",
            ProviderId::Lusha => "lusha",
            ProviderId::Prospeo => "prospeo",
            ProviderId::Snov => "snov",
        }
    }

    /// Human-facing name used in failure messages.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            ProviderId::Apollo => "Apollo",
            ProviderId::RocketReach => "RocketReach",
            ProviderId::Lusha => "Lusha",
            ProviderId::Prospeo => "Prospeo",
            ProviderId::Snov => "Snov.io",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown provider: {0}")]
pub struct UnknownProvider(pub String);

impl FromStr for ProviderId {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        ProviderId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownProvider(needle.to_owned()))
    }
}

/// Secrets keyed by provider.
///
/// Used both for process-wide defaults and for per-request overrides. Blank
/// secrets are dropped on insert, so a present entry is always usable.
/// Deserializes from a JSON object keyed by provider name; unknown keys and
/// `null` values are ignored.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "HashMap<String, Option<String>>")]
pub struct Credentials {
    keys: HashMap<ProviderId, String>,
}

impl Credentials {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert. Blank secrets are ignored.
    #[must_use]
    pub fn with(mut self, provider: ProviderId, secret: impl Into<String>) -> Self {
        self.insert(provider, secret);
        self
    }

    pub fn insert(&mut self, provider: ProviderId, secret: impl Into<String>) {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return;
        }
        self.keys.insert(provider, secret);
    }

    #[must_use]
    pub fn get(&self, provider: ProviderId) -> Option<&str> {
        self.keys.get(&provider).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, provider: ProviderId) -> bool {
        self.keys.contains_key(&provider)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl From<HashMap<String, Option<String>>> for Credentials {
    fn from(raw: HashMap<String, Option<String>>) -> Self {
        let mut credentials = Credentials::new();
        for (name, secret) in raw {
            let Some(secret) = secret else { continue };
            match name.parse::<ProviderId>() {
                Ok(provider) => credentials.insert(provider, secret),
                Err(e) => tracing::debug!(error = %e, "ignoring credential for unknown provider"),
            }
        }
        credentials
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut configured: Vec<ProviderId> = self.keys.keys().copied().collect();
        configured.sort();
        f.debug_struct("Credentials")
            .field("configured", &configured)
            .finish()
    }
}

/// Ordered list of provider names to try.
///
/// Entries are kept as written so that names this build does not recognize
/// can be skipped by the engine instead of failing the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderOrder(Vec<String>);

impl ProviderOrder {
    /// The out-of-the-box order: the batch-capable provider first.
    #[must_use]
    pub fn standard() -> Self {
        Self::from_ids(ProviderId::ALL)
    }

    #[must_use]
    pub fn from_ids(ids: impl IntoIterator<Item = ProviderId>) -> Self {
        Self(ids.into_iter().map(|id| id.as_str().to_owned()).collect())
    }

    #[must_use]
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            names
                .into_iter()
                .map(|n| n.as_ref().trim().to_owned())
                .filter(|n| !n.is_empty())
                .collect(),
        )
    }

    /// Parses a comma-delimited list such as `"apollo, lusha"`.
    #[must_use]
    pub fn parse_csv(raw: &str) -> Self {
        Self::from_names(raw.split(','))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Whether `provider` appears anywhere in the order.
    #[must_use]
    pub fn contains(&self, provider: ProviderId) -> bool {
        self.names()
            .any(|name| name.parse::<ProviderId>() == Ok(provider))
    }

    /// Names in this order that do not match any known provider.
    #[must_use]
    pub fn unknown_names(&self) -> Vec<&str> {
        self.names()
            .filter(|name| name.parse::<ProviderId>().is_err())
            .collect()
    }
}
