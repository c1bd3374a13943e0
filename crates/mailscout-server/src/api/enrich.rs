//! Enrichment endpoints: single with overrides, single with defaults only, and bulk.

use axum::{extract::State, Extension, Json};
use mailscout_core::{Credentials, Outcome, PersonInput, ProviderOrder};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, ApiJson, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct EnrichRequest {
    person: PersonInput,
    #[serde(default)]
    api_keys: Option<Credentials>,
    #[serde(default)]
    providers: Option<ProviderOrder>,
}

#[derive(Debug, Deserialize)]
pub(super) struct BulkEnrichRequest {
    people: Vec<PersonInput>,
    #[serde(default)]
    api_keys: Option<Credentials>,
    #[serde(default)]
    providers: Option<ProviderOrder>,
}

#[derive(Debug, Serialize)]
pub(super) struct BulkEnrichResponse {
    results: Vec<Outcome>,
}

fn require_profile_url(person: &PersonInput) -> Result<(), ApiError> {
    if person.has_profile_url() {
        Ok(())
    } else {
        Err(ApiError::validation("linkedin_url is required", None))
    }
}

fn log_outcome(req_id: &RequestId, person: &PersonInput, outcome: &Outcome) {
    match outcome {
        Outcome::Success(s) => tracing::info!(
            request_id = %req_id.0,
            linkedin_url = %person.linkedin_url,
            source = %s.source,
            "found email"
        ),
        Outcome::Failure(f) => tracing::info!(
            request_id = %req_id.0,
            linkedin_url = %person.linkedin_url,
            error = %f.error,
            "no email found"
        ),
    }
}

pub(super) async fn enrich(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    ApiJson(request): ApiJson<EnrichRequest>,
) -> Result<Json<Outcome>, ApiError> {
    require_profile_url(&request.person)?;
    let outcome = state
        .engine
        .enrich_one(
            &request.person,
            request.api_keys.as_ref(),
            request.providers.as_ref(),
        )
        .await;
    log_outcome(&req_id, &request.person, &outcome);
    Ok(Json(outcome))
}

/// Process defaults only; request bodies cannot carry keys or an order here.
pub(super) async fn enrich_simple(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    ApiJson(person): ApiJson<PersonInput>,
) -> Result<Json<Outcome>, ApiError> {
    require_profile_url(&person)?;
    let outcome = state.engine.enrich_one(&person, None, None).await;
    log_outcome(&req_id, &person, &outcome);
    Ok(Json(outcome))
}

pub(super) async fn enrich_bulk(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    ApiJson(request): ApiJson<BulkEnrichRequest>,
) -> Result<Json<BulkEnrichResponse>, ApiError> {
    tracing::info!(request_id = %req_id.0, batch = request.people.len(), "bulk enrichment");
    let results = state
        .engine
        .enrich_many(
            &request.people,
            request.api_keys.as_ref(),
            request.providers.as_ref(),
        )
        .await?;
    let found = results.iter().filter(|r| r.is_success()).count();
    tracing::info!(
        request_id = %req_id.0,
        found,
        total = results.len(),
        "bulk enrichment complete"
    );
    Ok(Json(BulkEnrichResponse { results }))
}
