//! JSON body extractor that does not insist on a `Content-Type` header.

use crate::errors::{AppError, messages};
use axum::{
    body::Bytes,
    extract::{FromRequest, Request, rejection::BytesRejection},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Decodes the request body as JSON regardless of the declared content type.
///
/// Unlike [`axum::Json`], a missing or foreign `Content-Type` is not an error;
/// only an unreadable body or malformed JSON is. Unknown fields are ignored
/// unless the target type opts into `deny_unknown_fields`.
///
/// Only the first JSON value is decoded. Anything after it is left unread,
/// so `{"a":1}\n{}` yields `{"a":1}`.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::LenientJson;
///
/// async fn create(LenientJson(payload): LenientJson<NewThing>) -> StatusCode {
///     StatusCode::CREATED
/// }
/// ```
///
/// Handlers that need their own error message can take
/// `Result<LenientJson<T>, LenientJsonRejection>` and map the rejection.
pub struct LenientJson<T>(pub T);

/// Why a [`LenientJson`] body could not be extracted
#[derive(Debug, Error)]
pub enum LenientJsonRejection {
    #[error("failed to read request body: {0}")]
    Body(#[from] BytesRejection),

    #[error("failed to decode request body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("request body holds no JSON value")]
    Empty,
}

impl IntoResponse for LenientJsonRejection {
    fn into_response(self) -> Response {
        tracing::debug!("Rejecting request body: {}", self);
        AppError::BadRequest(messages::INVALID_PAYLOAD.to_string()).into_response()
    }
}

impl<T, S> FromRequest<S> for LenientJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = LenientJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await?;
        let mut values = serde_json::Deserializer::from_slice(&bytes).into_iter::<T>();
        match values.next() {
            Some(value) => Ok(LenientJson(value?)),
            None => Err(LenientJsonRejection::Empty),
        }
    }
}
