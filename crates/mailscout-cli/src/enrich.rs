//! Command handlers. Results are printed to stdout as pretty JSON.

use std::path::Path;

use anyhow::Context;
use mailscout_core::{AppConfig, Credentials, Outcome, PersonInput, ProviderId, ProviderOrder};
use mailscout_engine::Waterfall;
use serde::{Deserialize, Serialize};

use crate::OverrideArgs;

/// A bulk input file: either a bare list or `{ "people": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum BulkFile {
    List(Vec<PersonInput>),
    Wrapped { people: Vec<PersonInput> },
}

impl BulkFile {
    pub(crate) fn into_people(self) -> Vec<PersonInput> {
        match self {
            BulkFile::List(people) | BulkFile::Wrapped { people } => people,
        }
    }
}

#[derive(Debug, Serialize)]
struct BulkOutput<'a> {
    results: &'a [Outcome],
}

impl OverrideArgs {
    pub(crate) fn credentials(&self) -> Option<Credentials> {
        if self.keys.is_empty() {
            return None;
        }
        let mut credentials = Credentials::new();
        for (provider, secret) in &self.keys {
            credentials.insert(*provider, secret.clone());
        }
        Some(credentials)
    }

    pub(crate) fn order(&self) -> Option<ProviderOrder> {
        let order = ProviderOrder::from_names(&self.providers);
        (!order.is_empty()).then_some(order)
    }
}

/// YAML is a superset of JSON, so one parser covers both file formats.
pub(crate) fn parse_bulk_file(raw: &str) -> anyhow::Result<Vec<PersonInput>> {
    let file: BulkFile =
        serde_yaml::from_str(raw).context("expected a list of people or a `people` list")?;
    Ok(file.into_people())
}

pub(crate) async fn run_enrich(
    engine: &Waterfall,
    person: &PersonInput,
    overrides: &OverrideArgs,
    trace: bool,
) -> anyhow::Result<()> {
    let credentials = overrides.credentials();
    let order = overrides.order();
    let report = engine
        .enrich_one_with_report(person, credentials.as_ref(), order.as_ref())
        .await;

    let json = if trace {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string_pretty(&report.outcome)?
    };
    println!("{json}");
    Ok(())
}

pub(crate) async fn run_bulk(
    engine: &Waterfall,
    path: &Path,
    overrides: &OverrideArgs,
) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let people = parse_bulk_file(&raw).with_context(|| format!("invalid bulk file {}", path.display()))?;

    let credentials = overrides.credentials();
    let order = overrides.order();
    let results = engine
        .enrich_many(&people, credentials.as_ref(), order.as_ref())
        .await?;

    let found = results.iter().filter(|r| r.is_success()).count();
    tracing::info!(found, total = results.len(), "bulk enrichment complete");
    println!(
        "{}",
        serde_json::to_string_pretty(&BulkOutput { results: &results })?
    );
    Ok(())
}

/// One line per provider in the default order. Secrets are never printed.
pub(crate) fn provider_lines(config: &AppConfig) -> Vec<String> {
    config
        .provider_order
        .names()
        .map(|name| match name.parse::<ProviderId>() {
            Ok(provider) if config.credentials.contains(provider) => {
                format!("{provider:<12} configured")
            }
            Ok(provider) => format!(
                "{provider:<12} missing ({})",
                mailscout_core::credential_env_var(provider)
            ),
            Err(_) => format!("{name:<12} unknown"),
        })
        .collect()
}

pub(crate) fn run_providers(config: &AppConfig) {
    for line in provider_lines(config) {
        println!("{line}");
    }
}
