//! HTTP surface: `/api/generate`, `/api/refine` and `/api/health`.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, warn, Instrument};
use uuid::Uuid;

use crate::errors::SiteGenError;
use crate::pipeline;
use crate::provider::DynProvider;
use crate::wire::{ClientErrorResponse, FailureResponse, GenerationRequest, Health, RefinementRequest, SiteResponse};

/// Shared state handed to every handler. Read-only.
#[derive(Clone)]
pub struct AppState {
    pub provider: DynProvider,
}

impl AppState {
    pub fn new(provider: DynProvider) -> Self {
        Self { provider }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/generate", post(generate))
        .route("/api/refine", post(refine))
        .route("/api/health", get(health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn client_error(message: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, Json(ClientErrorResponse { error: message.into() })).into_response()
}

fn pipeline_failure(summary: &str, err: SiteGenError) -> Response {
    if err.is_client_error() {
        warn!(%err, "rejected request");
        return client_error(err.to_string());
    }
    error!(%err, "{summary}");
    let body = FailureResponse { success: false, error: summary.to_string(), details: err.to_string() };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

async fn generate(State(state): State<AppState>, body: Result<Json<GenerationRequest>, JsonRejection>) -> Response {
    let Json(req) = match body {
        Ok(b) => b,
        Err(rej) => return client_error(rej.body_text()),
    };
    let span = tracing::info_span!("generate", request_id = %Uuid::new_v4());
    // Failure logging stays inside the span so it carries the request id.
    async move {
        match pipeline::generate(state.provider.as_ref(), &req).await {
            Ok(site) => Json(SiteResponse::ok(site)).into_response(),
            Err(e) => pipeline_failure("Failed to generate website", e),
        }
    }
    .instrument(span)
    .await
}

async fn refine(State(state): State<AppState>, body: Result<Json<RefinementRequest>, JsonRejection>) -> Response {
    let Json(req) = match body {
        Ok(b) => b,
        Err(rej) => return client_error(rej.body_text()),
    };
    let span = tracing::info_span!("refine", request_id = %Uuid::new_v4());
    // Failure logging stays inside the span so it carries the request id.
    async move {
        match pipeline::refine(state.provider.as_ref(), &req).await {
            Ok(site) => Json(SiteResponse::ok(site)).into_response(),
            Err(e) => pipeline_failure("Failed to refine website", e),
        }
    }
    .instrument(span)
    .await
}

async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "ok",
        model: state.provider.model().to_string(),
        provider: state.provider.label().to_string(),
    })
}
