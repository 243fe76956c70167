//! Caller resolution and authorization extractors
//!
//! `resolve_caller` runs once per request and stores a [`Caller`] in the
//! request extensions. Handlers then pick the gate they need by extractor:
//! [`AuthUser`] for any signed-in user, [`AdminUser`] for admins, and
//! [`SensorApiKey`] for sensor submissions.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{header, request::Parts, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::application::IdentityService;
use crate::domain::{DomainError, User};

/// Header carrying a sensor's API key
pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Clone)]
pub struct AuthState {
    pub identity: Arc<IdentityService>,
}

/// Who is making the request
#[derive(Clone, Debug)]
pub enum Caller {
    Anonymous,
    User(User),
}

/// Token from `Authorization: Bearer <token>`; the scheme is case-insensitive
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    scheme
        .eq_ignore_ascii_case("bearer")
        .then(|| token.trim())
        .filter(|token| !token.is_empty())
}

/// Resolve the bearer token, if any, into a [`Caller`].
///
/// No token means anonymous. A token that fails verification or names an
/// unknown user is rejected here, even on public routes.
pub async fn resolve_caller(
    State(state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let caller = match bearer_token(request.headers()) {
        None => Caller::Anonymous,
        Some(token) => match state.identity.resolve_token(token).await {
            Ok(user) => {
                debug!(user_id = user.id, admin = user.is_admin, "Caller resolved");
                Caller::User(user)
            }
            Err(e) => return e.into_response(),
        },
    };

    request.extensions_mut().insert(caller);
    next.run(request).await
}

fn caller_user(parts: &Parts) -> Result<User, DomainError> {
    match parts.extensions.get::<Caller>() {
        Some(Caller::User(user)) => Ok(user.clone()),
        _ => Err(DomainError::Unauthorized("Not authenticated".into())),
    }
}

/// Any authenticated user
pub struct AuthUser(pub User);

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = DomainError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        caller_user(parts).map(AuthUser)
    }
}

/// An authenticated user with `is_admin`
pub struct AdminUser(pub User);

impl<S: Send + Sync> FromRequestParts<S> for AdminUser {
    type Rejection = DomainError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = caller_user(parts)?;
        if !user.is_admin {
            return Err(DomainError::Forbidden("Not enough permissions".into()));
        }
        Ok(AdminUser(user))
    }
}

/// Raw `X-API-Key` header value; checked against sensors by the service
pub struct SensorApiKey(pub String);

impl<S: Send + Sync> FromRequestParts<S> for SensorApiKey {
    type Rejection = DomainError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(|v| SensorApiKey(v.to_string()))
            .ok_or_else(|| DomainError::Unauthorized("Missing API key".into()))
    }
}
