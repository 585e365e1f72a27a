//! Request body extraction.

use async_trait::async_trait;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use serde::de::DeserializeOwned;

use crate::domain::foundation::ErrorCode;

use super::error::error_response;

/// JSON body extractor that reports unreadable bodies in the API's error
/// format.
///
/// A missing `Content-Type`, malformed JSON or a field of the wrong type all
/// answer 400 `VALIDATION_FAILED` with a `{code, message}` body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(error_response(
                StatusCode::BAD_REQUEST,
                ErrorCode::ValidationFailed,
                rejection.body_text(),
            )),
        }
    }
}
