//! JSON response encoding.
//!
//! [`ApiError`] is turned into a status code here and nowhere else.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::error::{ApiError, PersistenceError};

/// Error body returned by every failing route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable description.
    pub error: String,
}

impl ErrorResponse {
    /// Create an error body.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

impl ApiError {
    /// Status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Decode(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Persistence(PersistenceError::ConstraintViolation { .. }) => {
                StatusCode::BAD_REQUEST
            }
            Self::Persistence(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show callers. Datastore detail stays in the logs.
    fn public_message(&self) -> String {
        match self {
            Self::Persistence(PersistenceError::ConstraintViolation { message }) => {
                format!("Couldn't create user: {message}")
            }
            Self::Persistence(_) => "Couldn't create user".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Responding with {} error: {}", status.as_u16(), self);
        }
        (status, Json(ErrorResponse::new(self.public_message()))).into_response()
    }
}
