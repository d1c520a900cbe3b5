use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

pub const NAME_REQUIRED: &str = "Name is required";

#[derive(Debug, Error)]
pub enum ItemError {
    #[error("Item not found")]
    NotFound(i64),

    /// Update or delete aimed at an id that does not exist.
    #[error("Item with id {0} not found")]
    TargetNotFound(i64),

    #[error("Item with this name already exists")]
    DuplicateName,

    #[error("Another item with this name already exists")]
    NameTaken,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Database(String),

    #[error("{0}")]
    Internal(String),
}

pub type ItemResult<T> = Result<T, ItemError>;

/// Convert ItemError to AppError for standardized error responses
impl From<ItemError> for AppError {
    fn from(err: ItemError) -> Self {
        let message = err.to_string();
        match err {
            ItemError::NotFound(_) => AppError::NotFound(message),
            ItemError::TargetNotFound(_) => AppError::TargetNotFound(message),
            ItemError::DuplicateName | ItemError::NameTaken => AppError::Conflict(message),
            ItemError::Validation(_) => AppError::BadRequest(message),
            ItemError::Database(_) | ItemError::Internal(_) => {
                AppError::InternalServerError(message)
            }
        }
    }
}

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<DbErr> for ItemError {
    fn from(err: DbErr) -> Self {
        ItemError::Database(err.to_string())
    }
}
