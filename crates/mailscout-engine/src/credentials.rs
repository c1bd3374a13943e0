use mailscout_core::{Credentials, ProviderId};

/// Picks the secret to use for `provider`.
///
/// A request override beats the process default for the same provider and
/// has no effect on any other provider. `None` means "skip this provider",
/// never an error.
#[must_use]
pub fn resolve<'a>(
    provider: ProviderId,
    overrides: Option<&'a Credentials>,
    defaults: &'a Credentials,
) -> Option<&'a str> {
    overrides
        .and_then(|o| o.get(provider))
        .or_else(|| defaults.get(provider))
}
