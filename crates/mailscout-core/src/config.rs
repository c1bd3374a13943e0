use crate::app_config::AppConfig;
use crate::provider::{Credentials, ProviderId, ProviderOrder};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Env var holding each provider's process-wide credential.
#[must_use]
pub fn credential_env_var(provider: ProviderId) -> &'static str {
    match provider {
        ProviderId::Apollo => "APOLLO_API_KEY",
        ProviderId::RocketReach => "ROCKETREACH_API_KEY",
        ProviderId::Lusha => "LUSHA_API_KEY",
        ProviderId::Prospeo => "PROSPEO_API_KEY",
        ProviderId::Snov => "SNOV_API_KEY",
    }
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let bind_addr = parse_addr("MAILSCOUT_BIND_ADDR", "0.0.0.0:8000")?;
    let log_level = or_default("MAILSCOUT_LOG_LEVEL", "info");

    let provider_order = parse_provider_order(&or_default(
        "MAILSCOUT_PROVIDER_ORDER",
        "apollo,rocketreach,lusha,prospeo,snov",
    ))?;

    let mut credentials = Credentials::new();
    for provider in ProviderId::ALL {
        if let Ok(secret) = lookup(credential_env_var(provider)) {
            credentials.insert(provider, secret);
        }
    }

    let provider_timeout_secs = parse_u64("MAILSCOUT_PROVIDER_TIMEOUT_SECS", "30")?;
    let poll_timeout_secs = parse_u64("MAILSCOUT_POLL_TIMEOUT_SECS", "120")?;
    let poll_max_attempts = parse_u32("MAILSCOUT_POLL_MAX_ATTEMPTS", "10")?;
    let poll_interval_ms = parse_u64("MAILSCOUT_POLL_INTERVAL_MS", "2000")?;

    let max_batch_size = parse_usize("MAILSCOUT_MAX_BATCH_SIZE", "10")?;
    if max_batch_size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "MAILSCOUT_MAX_BATCH_SIZE".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let user_agent = or_default("MAILSCOUT_USER_AGENT", "mailscout/0.1 (contact-enrichment)");

    Ok(AppConfig {
        bind_addr,
        log_level,
        provider_order,
        credentials,
        provider_timeout_secs,
        poll_timeout_secs,
        poll_max_attempts,
        poll_interval_ms,
        max_batch_size,
        user_agent,
    })
}

/// Parse the default provider order.
///
/// Unlike request-supplied orders, the configured default must name only
/// known providers: a typo here would silently disable a provider for every
/// request.
fn parse_provider_order(raw: &str) -> Result<ProviderOrder, ConfigError> {
    let order = ProviderOrder::parse_csv(raw);
    if order.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "MAILSCOUT_PROVIDER_ORDER".to_string(),
            reason: "must name at least one provider".to_string(),
        });
    }
    if let Some(unknown) = order.unknown_names().first() {
        return Err(ConfigError::InvalidEnvVar {
            var: "MAILSCOUT_PROVIDER_ORDER".to_string(),
            reason: format!("unknown provider \"{unknown}\""),
        });
    }
    Ok(order)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
