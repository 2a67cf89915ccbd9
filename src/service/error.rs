//! Service facade error types.

use miette::Diagnostic;
use thiserror::Error;

use crate::db::{DbError, ValidationError};

/// Errors surfaced by [`TodoService`](super::TodoService) operations.
#[derive(Error, Diagnostic, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    #[diagnostic(code(todo_app::service::validation))]
    Validation(#[from] ValidationError),

    #[error("Todo not found: {id}")]
    #[diagnostic(code(todo_app::service::not_found))]
    NotFound { id: String },

    #[error("Store error: {message}")]
    #[diagnostic(
        code(todo_app::service::store),
        help("Check that the database is reachable and migrated")
    )]
    Store { message: String },
}

impl From<DbError> for ServiceError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { id, .. } => ServiceError::NotFound { id },
            other => ServiceError::Store {
                message: other.to_string(),
            },
        }
    }
}

/// What clients see in place of a store failure's details.
pub const STORE_FAILURE_MESSAGE: &str = "Internal store error";

impl ServiceError {
    /// Message for adapters to hand back to callers.
    ///
    /// Store failures carry driver text that stays in the logs.
    pub fn client_message(&self) -> String {
        match self {
            ServiceError::Store { .. } => STORE_FAILURE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
