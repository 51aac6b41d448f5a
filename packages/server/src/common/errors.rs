use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use super::validation::ValidationErrors;
use crate::kernel::StoreError;

/// Errors surfaced at the HTTP boundary.
///
/// Every response body carries a `detail` field: a list of field errors for
/// validation failures, the underlying message otherwise.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Input rejected before business logic ran. HTTP 422.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// No document store is configured. HTTP 500.
    #[error("Database not available. Check DATABASE_URL and DATABASE_NAME environment variables.")]
    StoreUnavailable,

    /// The document store reported a failure. HTTP 500.
    #[error("{0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::StoreUnavailable | ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            ApiError::Validation(errors) => serde_json::json!({ "detail": errors }),
            other => {
                tracing::error!(error = %other, "Request failed");
                serde_json::json!({ "detail": other.to_string() })
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::validation::FieldError;

    #[test]
    fn status_code_mapping() {
        let validation = ApiError::from(ValidationErrors::single(FieldError::new(
            "query", "limit", "bad",
        )));
        assert_eq!(validation.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            ApiError::StoreUnavailable.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Store(StoreError::Backend("boom".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn store_error_display_is_just_message() {
        let err = ApiError::from(StoreError::Backend("connection refused".into()));
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn json_response_format() {
        let resp = ApiError::StoreUnavailable.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
