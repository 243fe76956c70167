//! Query-string extractor that reports failures in the JSON error body

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::Response;
use serde::de::DeserializeOwned;

use super::error_response;

/// Like `axum::extract::Query<T>`, but a malformed query string yields a
/// 400 with `{"detail": ...}` instead of plain text.
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Invalid query: {}", rejection.body_text()),
                )
            })?;
        Ok(ApiQuery(value))
    }
}
