pub mod app_config;
pub mod config;
pub mod outcome;
pub mod person;
pub mod provider;

pub use app_config::AppConfig;
pub use config::{credential_env_var, load_app_config, load_app_config_from_env};
pub use outcome::{EnrichmentFailure, EnrichmentSuccess, ErrorKind, Outcome};
pub use person::PersonInput;
pub use provider::{Credentials, ProviderId, ProviderOrder, UnknownProvider};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
