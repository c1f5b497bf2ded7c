use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

/// Everything that can go wrong between the HTTP boundary and the `tasks` table.
///
/// The display strings are returned to clients verbatim.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("ID cannot be empty")]
    EmptyId,

    #[error("title cannot be empty")]
    EmptyTitle,

    #[error("status cannot be empty")]
    EmptyStatus,

    #[error("the status is invalid")]
    InvalidStatus,

    #[error("the id is invalid")]
    InvalidId,

    #[error("task not found")]
    NotFound,

    #[error("invalid request payload")]
    InvalidPayload,

    #[error("failed to encode task")]
    FailedEncode,

    /// Any fault reported by the database driver
    #[error("{0}")]
    Storage(#[from] sea_orm::DbErr),
}

pub type TaskResult<T> = Result<T, TaskError>;

/// Convert TaskError to AppError for standardized error responses
impl From<TaskError> for AppError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::EmptyId
            | TaskError::EmptyTitle
            | TaskError::EmptyStatus
            | TaskError::InvalidStatus
            | TaskError::InvalidId
            | TaskError::InvalidPayload => AppError::BadRequest(err.to_string()),
            TaskError::NotFound => AppError::NotFound(err.to_string()),
            TaskError::FailedEncode | TaskError::Storage(_) => {
                AppError::InternalServerError(err.to_string())
            }
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
