//! Loosely typed JSON shapes that several providers share.
//!
//! Provider payloads drift: a company may be a bare string or an object,
//! an email list may hold strings or objects. These enums accept every
//! variant seen in practice and ignore anything else instead of failing the
//! whole response.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

/// `"Acme"` or `{"name": "Acme", ...}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum Named {
    Text(String),
    Object {
        #[serde(default)]
        name: Option<String>,
    },
    Other(IgnoredAny),
}

impl Named {
    pub(crate) fn into_name(self) -> Option<String> {
        match self {
            Named::Text(name) => non_blank(Some(name)),
            Named::Object { name } => non_blank(name),
            Named::Other(_) => None,
        }
    }
}

/// `"jane@acme.io"` or `{"email": "jane@acme.io", ...}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum EmailEntry {
    Text(String),
    Object {
        #[serde(default)]
        email: Option<String>,
    },
    Other(IgnoredAny),
}

impl EmailEntry {
    pub(crate) fn into_email(self) -> Option<String> {
        match self {
            EmailEntry::Text(email) => non_blank(Some(email)),
            EmailEntry::Object { email } => non_blank(email),
            EmailEntry::Other(_) => None,
        }
    }
}

/// `#[serde(deserialize_with)]` target that reads an explicit `null` as the
/// default value. `#[serde(default)]` alone only covers a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Trims and drops empty strings.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// First non-blank value, in order.
pub(crate) fn first_non_blank<I>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    candidates.into_iter().find_map(non_blank)
}
