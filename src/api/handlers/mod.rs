//! HTTP handlers.
//!
//! Handlers own request parsing and response shaping only; every operation is
//! delegated to the [`TodoService`](crate::service::TodoService) held in the
//! application state.

mod stats;
mod system;
mod todos;

#[cfg(test)]
mod todos_test;

use axum::{Json, http::StatusCode};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::db::ValidationError;
use crate::service::ServiceError;

pub use stats::*;
pub use system::*;
pub use todos::*;

/// Error response DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    #[schema(example = "Todo not found: 4f1c2a9b7d3e")]
    pub error: String,
}

/// Error half of every handler result.
pub type HandlerError = (StatusCode, Json<ErrorResponse>);

pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> HandlerError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

pub(crate) fn bad_request(message: impl Into<String>) -> HandlerError {
    error_response(StatusCode::BAD_REQUEST, message)
}

impl From<ValidationError> for ErrorResponse {
    fn from(e: ValidationError) -> Self {
        Self {
            error: e.to_string(),
        }
    }
}

/// Map a facade error to its HTTP status.
pub(crate) fn service_error(e: ServiceError) -> HandlerError {
    match e {
        ServiceError::Validation(v) => (StatusCode::BAD_REQUEST, Json(ErrorResponse::from(v))),
        ServiceError::NotFound { .. } => error_response(StatusCode::NOT_FOUND, e.to_string()),
        ServiceError::Store { .. } => {
            error!(error = %e, "request failed in the store");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.client_message())
        }
    }
}
