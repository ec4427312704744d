//! HTTP API route definitions.

use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use super::cors::cors_layer;
use super::doc::ApiDoc;
use super::handlers::{create_user, error_probe, readiness, AppState};

/// Prefix every business route is mounted under.
pub const API_PREFIX: &str = "/v1";

/// Path the OpenAPI document is served from.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Routes mounted under [`API_PREFIX`].
fn v1_router() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(readiness))
        .route("/err", get(error_probe))
        .route("/users", post(create_user))
}

/// Create the API router.
///
/// Built once at startup. Every route passes through the CORS and tracing
/// layers.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest(API_PREFIX, v1_router())
        .route(OPENAPI_PATH, get(|| async { Json(ApiDoc::openapi()) }))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
