//! Path-parameter extractor that reports failures in the JSON error body

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::Response;
use serde::de::DeserializeOwned;

use super::error_response;

/// Like `axum::extract::Path<T>`, but a non-numeric or overflowing id
/// yields a 400 with `{"detail": ...}` instead of plain text.
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Invalid path: {}", rejection.body_text()),
                )
            })?;
        Ok(ApiPath(value))
    }
}
