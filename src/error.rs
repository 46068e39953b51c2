//! Error types for Biblioteca server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

/// Stable numeric codes carried in every error body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    NoSuchBook = 2,
    BadValue = 3,
    InvalidCredentials = 4,
    AlreadyRented = 5,
    NotRented = 6,
    Inactive = 7,
    AlreadyActive = 8,
    MissingReason = 9,
    PersistenceFailure = 10,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Book not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Book {0} is already rented")]
    AlreadyRented(String),

    #[error("Book {0} is not rented")]
    NotRented(String),

    #[error("Book {0} is inactive")]
    Inactive(String),

    #[error("Book {0} is already active")]
    AlreadyActive(String),

    #[error("A deactivation reason is required: {0}")]
    MissingReason(String),

    #[error("Persistence failure: {0}")]
    Persistence(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl AppError {
    /// Status, code and client-facing message for this error
    fn parts(&self) -> (StatusCode, ErrorCode, String) {
        match self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NoSuchBook, self.to_string()),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, ErrorCode::BadValue, self.to_string()),
            AppError::InvalidCredentials => {
                (StatusCode::NOT_FOUND, ErrorCode::InvalidCredentials, self.to_string())
            }
            AppError::AlreadyRented(_) => (StatusCode::CONFLICT, ErrorCode::AlreadyRented, self.to_string()),
            AppError::NotRented(_) => (StatusCode::CONFLICT, ErrorCode::NotRented, self.to_string()),
            AppError::Inactive(_) => (StatusCode::CONFLICT, ErrorCode::Inactive, self.to_string()),
            AppError::AlreadyActive(_) => (StatusCode::CONFLICT, ErrorCode::AlreadyActive, self.to_string()),
            AppError::MissingReason(_) => {
                (StatusCode::BAD_REQUEST, ErrorCode::MissingReason, self.to_string())
            }
            AppError::Persistence(e) => {
                tracing::error!("Persistence error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::PersistenceFailure,
                    "Failed to persist library document".to_string(),
                )
            }
            AppError::Serialization(e) => {
                tracing::error!("Serialization error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone()),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .iter()
            .map(|(field, errs)| {
                let detail = errs
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect::<Vec<_>>()
                    .join(", ");
                if detail.is_empty() {
                    field.to_string()
                } else {
                    format!("{}: {}", field, detail)
                }
            })
            .collect();
        fields.sort();
        AppError::Validation(fields.join("; "))
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::NotFound("x".into()).parts().0, StatusCode::NOT_FOUND);
        assert_eq!(AppError::AlreadyRented("x".into()).parts().0, StatusCode::CONFLICT);
        assert_eq!(AppError::MissingReason("x".into()).parts().0, StatusCode::BAD_REQUEST);

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let (status, code, message) = AppError::from(io).parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, ErrorCode::PersistenceFailure);
        assert!(!message.contains("read-only"));
    }
}
