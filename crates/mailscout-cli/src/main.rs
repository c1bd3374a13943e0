mod enrich;

use clap::{Args, Parser, Subcommand};
use mailscout_core::{AppConfig, PersonInput, ProviderId};
use mailscout_engine::Waterfall;
use mailscout_providers::{HttpSettings, ProviderRegistry};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "mailscout")]
#[command(about = "Find work emails for professional profiles across several data providers")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Enrich a single person and print the outcome as JSON
    Enrich {
        /// Professional-network profile URL
        #[arg(long)]
        linkedin_url: String,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        /// Combined name, split on the first space when first/last are absent
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        domain: Option<String>,
        #[command(flatten)]
        overrides: OverrideArgs,
        /// Print every provider attempt and skip alongside the outcome
        #[arg(long)]
        trace: bool,
    },
    /// Enrich a YAML or JSON list of people
    Bulk {
        /// File containing a list of people, or an object with a `people` list
        file: std::path::PathBuf,
        #[command(flatten)]
        overrides: OverrideArgs,
    },
    /// Show the default provider order and which providers have a credential
    Providers,
}

/// Per-invocation replacements for the configured order and keys.
#[derive(Debug, Clone, Default, Args)]
struct OverrideArgs {
    /// Provider order to use instead of the configured one (e.g. lusha,apollo)
    #[arg(long, value_delimiter = ',')]
    providers: Vec<String>,
    /// Credential override as provider=secret; may be repeated
    #[arg(long = "key", value_parser = parse_key)]
    keys: Vec<(ProviderId, String)>,
}

fn parse_key(raw: &str) -> Result<(ProviderId, String), String> {
    let (name, secret) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected provider=secret, got '{raw}'"))?;
    let provider = name.parse::<ProviderId>().map_err(|e| e.to_string())?;
    if secret.trim().is_empty() {
        return Err(format!("empty secret for {provider}"));
    }
    Ok((provider, secret.to_owned()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse first so `--help` and usage errors never depend on the environment.
    let cli = Cli::parse();

    let config = mailscout_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    // Stdout carries JSON results; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    run(cli.command, &config).await
}

fn build_engine(config: &AppConfig) -> anyhow::Result<Waterfall> {
    let registry = ProviderRegistry::standard(&HttpSettings::from_app_config(config))?;
    Ok(Waterfall::from_config(registry, config))
}

async fn run(command: Commands, config: &AppConfig) -> anyhow::Result<()> {
    match command {
        Commands::Enrich {
            linkedin_url,
            first_name,
            last_name,
            name,
            company,
            domain,
            overrides,
            trace,
        } => {
            let person = PersonInput {
                first_name,
                last_name,
                name,
                company,
                domain,
                ..PersonInput::new(linkedin_url)
            };
            let engine = build_engine(config)?;
            enrich::run_enrich(&engine, &person, &overrides, trace).await?;
        }
        Commands::Bulk { file, overrides } => {
            let engine = build_engine(config)?;
            enrich::run_bulk(&engine, &file, &overrides).await?;
        }
        Commands::Providers => enrich::run_providers(config),
    }

    Ok(())
}
