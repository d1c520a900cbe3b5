pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Message used when a failure carries no text of its own.
pub const UNKNOWN_ERROR: &str = "An unknown error occurred";

/// Error body reported under `error`.
///
/// ```json
/// { "error": "Name is required" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

/// Body reported under `message`, used for acknowledgements and for
/// missing mutation targets.
///
/// ```json
/// { "message": "Item with id 7 not found" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Application error type that can be converted to HTTP responses.
///
/// Every variant is logged with its [`ErrorCode`] before the response is
/// built. Server-side failures report their own message when they have one,
/// and [`UNKNOWN_ERROR`] otherwise.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    /// Uniqueness conflict. Reported as 400, like other rejected input.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Unknown resource on a read, reported under `error`.
    #[error("Not Found: {0}")]
    NotFound(String),

    /// Unknown resource targeted by a write, reported under `message`.
    #[error("Not Found: {0}")]
    TargetNotFound(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

fn error_body(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorResponse { error: message })).into_response()
}

fn or_unknown(message: String) -> String {
    if message.trim().is_empty() {
        UNKNOWN_ERROR.to_string()
    } else {
        message
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Database(e) => {
                let code = match e {
                    DbErr::ConnectionAcquire(_) => ErrorCode::DatabasePoolTimeout,
                    _ => ErrorCode::DatabaseError,
                };
                tracing::error!(error_code = code.code(), "Database error: {:?}", e);
                error_body(StatusCode::INTERNAL_SERVER_ERROR, or_unknown(e.to_string()))
            }
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(
                    error_code = ErrorCode::JsonExtraction.code(),
                    "JSON extraction error: {:?}",
                    e
                );
                error_body(e.status(), e.body_text())
            }
            AppError::ValidationError(e) => {
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    "Validation error: {:?}",
                    e
                );
                error_body(StatusCode::BAD_REQUEST, validation_message(&e))
            }
            AppError::InvalidId(raw) => {
                tracing::info!(error_code = ErrorCode::InvalidId.code(), "Invalid id: {}", raw);
                error_body(StatusCode::BAD_REQUEST, format!("Invalid id: {}", raw))
            }
            AppError::BadRequest(msg) => {
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    "Bad request: {}",
                    msg
                );
                error_body(StatusCode::BAD_REQUEST, msg)
            }
            AppError::Conflict(msg) => {
                tracing::info!(error_code = ErrorCode::Conflict.code(), "Conflict: {}", msg);
                error_body(StatusCode::BAD_REQUEST, msg)
            }
            AppError::NotFound(msg) => {
                tracing::info!(error_code = ErrorCode::NotFound.code(), "Not found: {}", msg);
                error_body(StatusCode::NOT_FOUND, msg)
            }
            AppError::TargetNotFound(msg) => {
                tracing::info!(error_code = ErrorCode::NotFound.code(), "Not found: {}", msg);
                (StatusCode::NOT_FOUND, Json(MessageResponse::new(msg))).into_response()
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(
                    error_code = ErrorCode::InternalError.code(),
                    "Internal server error: {}",
                    msg
                );
                error_body(StatusCode::INTERNAL_SERVER_ERROR, or_unknown(msg))
            }
        }
    }
}

/// First validation message, taking fields in name order.
///
/// Falls back to a generic text when no rule carried a message.
pub fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(_, errs)| errs.iter())
        .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Request validation failed".to_string())
}
