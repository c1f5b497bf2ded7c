use axum::response::{IntoResponse, Response};

use super::{AppError, messages};

/// Handler for 404 Not Found errors.
///
/// Used as the router fallback for paths no route matches.
pub async fn not_found() -> Response {
    AppError::NotFound(messages::ROUTE_NOT_FOUND.to_string()).into_response()
}
