//! Todo Error Types
//!
//! Todo-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::id::InvalidId;
use thiserror::Error;

/// Todo-specific result type alias
pub type TodoResult<T> = Result<T, TodoError>;

#[derive(Debug, Error)]
pub enum TodoError {
    /// Malformed input the client can fix
    #[error("{0}")]
    Validation(String),

    /// Record absent, vanished concurrently, or no accessible records
    #[error("{0}")]
    NotFound(&'static str),

    /// Authenticated, but the record belongs to someone else
    #[error("You are not allowed to access this record")]
    Forbidden,

    /// Category reference is missing or owned by another user
    #[error("Category does not exist or belongs to another user")]
    InvalidReference,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TodoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TodoError::Validation(_) => ErrorKind::BadRequest,
            TodoError::NotFound(_) => ErrorKind::NotFound,
            TodoError::Forbidden => ErrorKind::Forbidden,
            TodoError::InvalidReference => ErrorKind::UnprocessableEntity,
            TodoError::Database(_) | TodoError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError, keeping store details out of the message
    pub fn to_app_error(&self) -> AppError {
        match self {
            TodoError::Database(_) | TodoError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            TodoError::InvalidReference => AppError::unprocessable(self.to_string())
                .with_action("Create the category first or omit it"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            TodoError::Database(e) => {
                tracing::error!(error = %e, "Todo database error");
            }
            TodoError::Internal(msg) => {
                tracing::error!(message = %msg, "Todo internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Todo error");
            }
        }
    }
}

impl IntoResponse for TodoError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<InvalidId> for TodoError {
    fn from(err: InvalidId) -> Self {
        TodoError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(TodoError::Validation("x".into()).kind(), ErrorKind::BadRequest);
        assert_eq!(TodoError::NotFound("x").kind(), ErrorKind::NotFound);
        assert_eq!(TodoError::Forbidden.kind(), ErrorKind::Forbidden);
        assert_eq!(
            TodoError::InvalidReference.kind(),
            ErrorKind::UnprocessableEntity
        );
        assert_eq!(
            TodoError::Database(sqlx::Error::PoolTimedOut).kind(),
            ErrorKind::InternalServerError
        );
    }

    #[test]
    fn test_store_detail_is_not_exposed() {
        let err = TodoError::Database(sqlx::Error::Protocol("relation todos missing".into()));
        let app = err.to_app_error();
        assert_eq!(app.status_code(), 500);
        assert!(!app.message().contains("todos"));
    }

    #[test]
    fn test_invalid_id_is_validation() {
        let err: TodoError = kernel::id::TodoId::new(-3).unwrap_err().into();
        assert!(matches!(err, TodoError::Validation(_)));
    }
}
