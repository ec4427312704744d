//! HTTP API handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::metrics;
use crate::store::{User, UserStore};

use super::response::ErrorResponse;

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Datastore handle.
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    /// Create new app state.
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: String,
}

/// Body of `POST /v1/users`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    /// Display name. Must not be blank.
    pub name: String,
}

/// Health check handler - always returns 200.
#[utoipa::path(
    get,
    path = "/v1/healthz",
    responses((status = 200, description = "Service is accepting connections", body = HealthResponse)),
    tag = "health"
)]
pub async fn readiness() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Error probe - always returns 500.
#[utoipa::path(
    get,
    path = "/v1/err",
    responses((status = 500, description = "Fixed error payload", body = ErrorResponse)),
    tag = "health"
)]
pub async fn error_probe() -> ApiError {
    ApiError::Internal("Something went wrong".to_string())
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/v1/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Malformed body or name already taken", body = ErrorResponse),
        (status = 500, description = "Datastore failure", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::Decode(rejection.body_text()))?;

    let name = request.name.trim();
    if name.is_empty() {
        return Err(ApiError::Validation("name must not be empty".to_string()));
    }

    let result = {
        let _timer = metrics::timer_user_create();
        state.users.create_user(name).await
    };

    match result {
        Ok(user) => {
            metrics::inc_users_created();
            info!(id = %user.id, name = %user.name, "User created");
            Ok((StatusCode::CREATED, Json(user)))
        }
        Err(e) => {
            metrics::inc_user_create_failed(e.kind());
            warn!("Failed to create user {:?}: {}", name, e);
            Err(e.into())
        }
    }
}
