use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::validation::FieldErrors;

/// Failures raised by a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint was violated; carries the offending field name.
    #[error("duplicate value for unique field '{0}'")]
    Duplicate(String),
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl From<mongodb::error::Error> for StoreError {
    fn from(e: mongodb::error::Error) -> Self {
        StoreError::Backend(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    /// Submitted form data failed validation (400).
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
    /// Duplicate email/handle (400).
    #[error("conflict: {0}")]
    Conflict(FieldErrors),
    #[error("not found: {0}")]
    NotFound(FieldErrors),
    #[error("unauthorized: {0}")]
    Unauthorized(FieldErrors),
    #[error("database error: {0}")]
    DatabaseError(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(field: &str, message: &str) -> Self {
        AppError::NotFound(FieldErrors::single(field, message))
    }

    pub fn unauthorized(field: &str, message: &str) -> Self {
        AppError::Unauthorized(FieldErrors::single(field, message))
    }

    pub fn conflict(field: &str, message: &str) -> Self {
        AppError::Conflict(FieldErrors::single(field, message))
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::DatabaseError(e.to_string())
    }
}

impl From<actix_web::error::BlockingError> for AppError {
    fn from(e: actix_web::error::BlockingError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::DatabaseError(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        match self {
            AppError::Validation(errors)
            | AppError::Conflict(errors)
            | AppError::NotFound(errors)
            | AppError::Unauthorized(errors) => builder.json(errors),
            AppError::DatabaseError(msg) | AppError::Internal(msg) => {
                log::error!("❌ {}", msg);
                builder.json(serde_json::json!({
                    "success": false,
                    "error": msg
                }))
            }
        }
    }
}
