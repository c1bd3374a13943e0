use mailscout_core::{Credentials, ErrorKind, Outcome, ProviderId, ProviderOrder};
use mailscout_providers::ProviderRegistry;

use super::*;
use crate::testing::{person, CallLog, MockAdapter};

fn all_keys() -> Credentials {
    ProviderId::ALL
        .into_iter()
        .fold(Credentials::new(), |c, id| c.with(id, format!("env-{id}")))
}

fn order(names: &[&str]) -> ProviderOrder {
    ProviderOrder::from_names(names)
}

#[tokio::test]
async fn first_success_stops_the_waterfall() {
    let log = CallLog::default();
    let registry = ProviderRegistry::new()
        .with(MockAdapter::finds(ProviderId::Apollo, &log))
        .with(MockAdapter::finds(ProviderId::Lusha, &log));
    let engine = Waterfall::new(registry, all_keys(), order(&["apollo", "lusha"]));

    let outcome = engine.enrich_one(&person("jane"), None, None).await;

    assert!(matches!(outcome, Outcome::Success(ref s) if s.source == ProviderId::Apollo));
    assert_eq!(log.providers(), vec![ProviderId::Apollo]);
}

#[tokio::test]
async fn falls_through_failures_in_order() {
    let log = CallLog::default();
    let registry = ProviderRegistry::new()
        .with(MockAdapter::fails(ProviderId::Apollo, ErrorKind::NotFound, &log))
        .with(MockAdapter::fails(ProviderId::RocketReach, ErrorKind::RateLimited, &log))
        .with(MockAdapter::finds(ProviderId::Prospeo, &log));
    let engine = Waterfall::new(
        registry,
        all_keys(),
        order(&["apollo", "rocketreach", "prospeo"]),
    );

    let outcome = engine.enrich_one(&person("jane"), None, None).await;

    assert!(matches!(outcome, Outcome::Success(ref s) if s.source == ProviderId::Prospeo));
    assert_eq!(
        log.providers(),
        vec![ProviderId::Apollo, ProviderId::RocketReach, ProviderId::Prospeo]
    );
}

#[tokio::test]
async fn all_failures_return_the_last_one() {
    let log = CallLog::default();
    let registry = ProviderRegistry::new()
        .with(MockAdapter::fails(ProviderId::Apollo, ErrorKind::RateLimited, &log))
        .with(MockAdapter::fails(ProviderId::Lusha, ErrorKind::AuthError, &log));
    let engine = Waterfall::new(registry, all_keys(), order(&["apollo", "lusha"]));

    let outcome = engine.enrich_one(&person("jane"), None, None).await;

    let failure = outcome.as_failure().expect("failure");
    assert_eq!(failure.error, ErrorKind::AuthError);
    assert_eq!(failure.message, "lusha failed");
    assert_eq!(log.calls().len(), 2);
}

#[tokio::test]
async fn no_credentials_means_not_found_without_any_call() {
    let log = CallLog::default();
    let registry = ProviderRegistry::new()
        .with(MockAdapter::finds(ProviderId::Apollo, &log))
        .with(MockAdapter::finds(ProviderId::Lusha, &log));
    let engine = Waterfall::new(registry, Credentials::new(), ProviderOrder::standard());

    let outcome = engine.enrich_one(&person("jane"), None, None).await;

    let failure = outcome.as_failure().expect("failure");
    assert_eq!(failure.error, ErrorKind::NotFound);
    assert_eq!(failure.message, NO_PROVIDER_MESSAGE);
    assert_eq!(
        failure.linkedin_url.as_deref(),
        Some("https://www.linkedin.com/in/jane")
    );
    assert!(log.calls().is_empty());
}

#[tokio::test]
async fn override_beats_default_for_that_provider_only() {
    let log = CallLog::default();
    let registry = ProviderRegistry::new()
        .with(MockAdapter::fails(ProviderId::Apollo, ErrorKind::NotFound, &log))
        .with(MockAdapter::fails(ProviderId::Lusha, ErrorKind::NotFound, &log));
    let engine = Waterfall::new(registry, all_keys(), order(&["apollo", "lusha"]));
    let overrides = Credentials::new().with(ProviderId::Apollo, "req-apollo");

    engine
        .enrich_one(&person("jane"), Some(&overrides), None)
        .await;

    let credentials: Vec<String> = log.calls().into_iter().map(|c| c.credential).collect();
    assert_eq!(credentials, vec!["req-apollo", "env-lusha"]);
}

#[tokio::test]
async fn override_enables_a_provider_without_default_key() {
    let log = CallLog::default();
    let registry = ProviderRegistry::new().with(MockAdapter::finds(ProviderId::Snov, &log));
    let engine = Waterfall::new(registry, Credentials::new(), order(&["snov"]));
    let overrides = Credentials::new().with(ProviderId::Snov, "id:secret");

    let outcome = engine
        .enrich_one(&person("jane"), Some(&overrides), None)
        .await;

    assert!(outcome.is_success());
}

#[tokio::test]
async fn order_override_replaces_default_order() {
    let log = CallLog::default();
    let registry = ProviderRegistry::new()
        .with(MockAdapter::fails(ProviderId::Apollo, ErrorKind::NotFound, &log))
        .with(MockAdapter::fails(ProviderId::Lusha, ErrorKind::NotFound, &log))
        .with(MockAdapter::fails(ProviderId::Prospeo, ErrorKind::NotFound, &log));
    let engine = Waterfall::new(registry, all_keys(), order(&["apollo", "lusha"]));

    engine
        .enrich_one(&person("jane"), None, Some(&order(&["prospeo", "lusha"])))
        .await;

    assert_eq!(log.providers(), vec![ProviderId::Prospeo, ProviderId::Lusha]);
}

#[tokio::test]
async fn empty_order_override_keeps_default() {
    let log = CallLog::default();
    let registry = ProviderRegistry::new().with(MockAdapter::finds(ProviderId::Apollo, &log));
    let engine = Waterfall::new(registry, all_keys(), order(&["apollo"]));

    let outcome = engine
        .enrich_one(&person("jane"), None, Some(&ProviderOrder::default()))
        .await;

    assert!(outcome.is_success());
}

#[tokio::test]
async fn unknown_and_unregistered_names_are_skipped() {
    let log = CallLog::default();
    let registry = ProviderRegistry::new().with(MockAdapter::finds(ProviderId::Lusha, &log));
    let engine = Waterfall::new(registry, all_keys(), ProviderOrder::standard());

    let report = engine
        .enrich_one_with_report(
            &person("jane"),
            None,
            Some(&order(&["clearbit", "apollo", "lusha"])),
        )
        .await;

    assert!(report.outcome.is_success());
    assert_eq!(log.providers(), vec![ProviderId::Lusha]);
    assert_eq!(
        report.skipped,
        vec![
            SkippedProvider {
                name: "clearbit".to_owned(),
                reason: SkipReason::UnknownProvider,
            },
            SkippedProvider {
                name: "apollo".to_owned(),
                reason: SkipReason::UnknownProvider,
            },
        ]
    );
}

#[tokio::test]
async fn report_lists_attempts_and_matches_primary_outcome() {
    let log = CallLog::default();
    let registry = ProviderRegistry::new()
        .with(MockAdapter::fails(ProviderId::Apollo, ErrorKind::NotFound, &log))
        .with(MockAdapter::fails(ProviderId::Lusha, ErrorKind::RateLimited, &log));
    let keys = Credentials::new()
        .with(ProviderId::Apollo, "a")
        .with(ProviderId::Lusha, "l");
    let engine = Waterfall::new(
        registry,
        keys,
        order(&["apollo", "rocketreach", "lusha"]),
    );

    let report = engine
        .enrich_one_with_report(&person("jane"), None, None)
        .await;
    let primary = engine.enrich_one(&person("jane"), None, None).await;

    assert_eq!(report.outcome, primary);
    let attempted: Vec<ProviderId> = report.attempts.iter().map(|a| a.provider).collect();
    assert_eq!(attempted, vec![ProviderId::Apollo, ProviderId::Lusha]);
    assert_eq!(
        report.skipped,
        vec![SkippedProvider {
            name: "rocketreach".to_owned(),
            reason: SkipReason::NoCredential,
        }]
    );
    assert_eq!(report.outcome.error_kind(), Some(ErrorKind::RateLimited));
}

#[tokio::test]
async fn blank_profile_url_is_rejected_before_any_call() {
    let log = CallLog::default();
    let registry = ProviderRegistry::new().with(MockAdapter::finds(ProviderId::Apollo, &log));
    let engine = Waterfall::new(registry, all_keys(), order(&["apollo"]));

    let outcome = engine
        .enrich_one(&mailscout_core::PersonInput::new("  "), None, None)
        .await;

    assert_eq!(outcome.error_kind(), Some(ErrorKind::ValidationError));
    assert!(log.calls().is_empty());
}

#[tokio::test]
async fn re_enriching_a_found_profile_url_completes() {
    let log = CallLog::default();
    let registry = ProviderRegistry::new()
        .with(MockAdapter::fails(ProviderId::Apollo, ErrorKind::NotFound, &log))
        .with(MockAdapter::finds(ProviderId::Lusha, &log));
    let engine = Waterfall::new(registry, all_keys(), order(&["apollo", "lusha"]));

    let Outcome::Success(first) = engine.enrich_one(&person("jane"), None, None).await else {
        panic!("expected success");
    };
    let again = mailscout_core::PersonInput::new(first.linkedin_url.clone());
    let second = engine.enrich_one(&again, None, None).await;

    assert!(matches!(second, Outcome::Success(_) | Outcome::Failure(_)));
    assert_eq!(log.calls().len(), 4);
}
