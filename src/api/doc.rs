//! OpenAPI document for the versioned API.

use utoipa::OpenApi;

use super::handlers;
use super::response::ErrorResponse;
use crate::store::User;

/// OpenAPI description of every `/v1` route.
#[derive(OpenApi)]
#[openapi(
    paths(handlers::readiness, handlers::error_probe, handlers::create_user),
    components(schemas(
        User,
        ErrorResponse,
        handlers::CreateUserRequest,
        handlers::HealthResponse
    )),
    tags(
        (name = "health", description = "Liveness and error probes"),
        (name = "users", description = "User registration")
    )
)]
pub struct ApiDoc;
