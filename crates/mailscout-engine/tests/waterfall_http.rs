//! End-to-end engine tests against wiremock-backed provider clients.

use mailscout_core::{Credentials, ErrorKind, Outcome, PersonInput, ProviderId, ProviderOrder};
use mailscout_engine::Waterfall;
use mailscout_providers::{ApolloClient, HttpSettings, LushaClient, ProviderRegistry};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn engine(apollo: &MockServer, lusha: &MockServer, keys: Credentials) -> Waterfall {
    let settings = HttpSettings::default();
    let registry = ProviderRegistry::new()
        .with_batch(ApolloClient::with_base_url(&settings, &apollo.uri()).expect("apollo client"))
        .with(LushaClient::with_base_url(&settings, &lusha.uri()).expect("lusha client"));
    Waterfall::new(
        registry,
        keys,
        ProviderOrder::from_ids([ProviderId::Apollo, ProviderId::Lusha]),
    )
}

fn both_keys() -> Credentials {
    Credentials::new()
        .with(ProviderId::Apollo, "apollo-key")
        .with(ProviderId::Lusha, "lusha-key")
}

#[tokio::test]
async fn rate_limited_first_provider_falls_back_to_second() {
    let apollo = MockServer::start().await;
    let lusha = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/people/match"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&apollo)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/person"))
        .and(header("api_key", "lusha-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "emailAddresses": [{ "email": "jane@acme.io", "type": "work" }]
        })))
        .expect(1)
        .mount(&lusha)
        .await;

    let outcome = engine(&apollo, &lusha, both_keys())
        .enrich_one(&PersonInput::new("https://www.linkedin.com/in/jane"), None, None)
        .await;

    assert!(matches!(outcome, Outcome::Success(ref s) if s.source == ProviderId::Lusha));
}

#[tokio::test]
async fn total_outage_degrades_to_last_upstream_error() {
    let apollo = MockServer::start().await;
    let lusha = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&apollo)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&lusha)
        .await;

    let outcome = engine(&apollo, &lusha, both_keys())
        .enrich_one(&PersonInput::new("https://www.linkedin.com/in/jane"), None, None)
        .await;

    let failure = outcome.as_failure().expect("failure");
    assert_eq!(failure.error, ErrorKind::UpstreamError);
    assert_eq!(failure.message, "Lusha API error (HTTP 502)");
}

#[tokio::test]
async fn bulk_uses_one_batch_call_and_repairs_misses() {
    let apollo = MockServer::start().await;
    let lusha = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/people/bulk_match"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "matches": [
                { "email": "a@acme.io" },
                null,
                { "email": "c@acme.io" }
            ]
        })))
        .expect(1)
        .mount(&apollo)
        .await;
    Mock::given(method("POST"))
        .and(path("/people/match"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "person": null })))
        .expect(1)
        .mount(&apollo)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/person"))
        .and(query_param("linkedinUrl", "https://www.linkedin.com/in/b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "emailAddresses": [{ "email": "b@acme.io" }] }
        })))
        .expect(1)
        .mount(&lusha)
        .await;

    let people: Vec<PersonInput> = ["a", "b", "c"]
        .iter()
        .map(|slug| PersonInput::new(format!("https://www.linkedin.com/in/{slug}")))
        .collect();
    let results = engine(&apollo, &lusha, both_keys())
        .enrich_many(&people, None, None)
        .await
        .expect("accepted");

    let emails: Vec<Option<&str>> = results
        .iter()
        .map(|r| match r {
            Outcome::Success(s) => Some(s.email.as_str()),
            Outcome::Failure(_) => None,
        })
        .collect();
    assert_eq!(emails, vec![Some("a@acme.io"), Some("b@acme.io"), Some("c@acme.io")]);
}
