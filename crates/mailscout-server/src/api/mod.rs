mod enrich;

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use mailscout_core::{EnrichmentFailure, ErrorKind};
use mailscout_engine::{BatchRejected, Waterfall};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Waterfall>,
}

/// Request-level rejection, rendered as a `validation_error` failure body.
///
/// Provider outcomes never go through here: they are returned verbatim with
/// `200 OK`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    failure: EnrichmentFailure,
}

impl ApiError {
    pub fn validation(message: impl Into<String>, linkedin_url: Option<&str>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            failure: EnrichmentFailure::new(ErrorKind::ValidationError, message, linkedin_url),
        }
    }
}

#[derive(Serialize)]
struct FailureBody<'a> {
    success: bool,
    #[serde(flatten)]
    failure: &'a EnrichmentFailure,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = FailureBody {
            success: false,
            failure: &self.failure,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<BatchRejected> for ApiError {
    fn from(rejection: BatchRejected) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            failure: rejection.to_failure(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation(rejection.body_text(), None)
    }
}

/// `Json<T>` whose rejections use the failure body instead of plain text.
pub(crate) struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/enrich", post(enrich::enrich))
        .route("/enrich/simple", post(enrich::enrich_simple))
        .route("/enrich/bulk", post(enrich::enrich_bulk))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http())
                .layer(build_cors()),
        )
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(HealthData { status: "ok" })
}
