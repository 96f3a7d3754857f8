//! Error conversions
//!
//! SQLSTATE helpers for domain crates mapping driver errors, and the
//! problem-details rendering of [`AppError`].

#[cfg(feature = "axum")]
use super::app_error::AppError;

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

/// PostgreSQL SQLSTATE for a unique constraint violation
pub const PG_UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL SQLSTATE for a foreign key violation
pub const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

/// SQLSTATE of a database error, if the driver reported one
#[cfg(feature = "sqlx")]
pub fn sqlstate(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().map(|c| c.into_owned()),
        _ => None,
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs
        let body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.message(),
            "action": self.action(),
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_sqlstate_absent_for_non_database_errors() {
        assert_eq!(sqlstate(&sqlx::Error::RowNotFound), None);
        assert_eq!(sqlstate(&sqlx::Error::PoolTimedOut), None);
    }

    #[cfg(feature = "axum")]
    #[test]
    fn test_problem_details_response() {
        use axum::http::{StatusCode, header};
        use axum::response::IntoResponse;

        let response = AppError::forbidden("Not yours").into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    }
}
