//! Authentication API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use super::dto::{LoginRequest, RegisterRequest, TokenResponse, UpdateProfileRequest, UserResponse};
use crate::application::IdentityService;
use crate::domain::DomainError;
use crate::interfaces::http::common::ValidatedJson;
use crate::interfaces::http::middleware::AuthUser;

#[derive(Clone)]
pub struct AuthHandlerState {
    pub identity: Arc<IdentityService>,
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation error or duplicate username/email")
    )
)]
pub async fn register(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), DomainError> {
    let user = state
        .identity
        .register(&request.username, &request.email, &request.password)
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = TokenResponse),
        (status = 401, description = "Incorrect username or password")
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenResponse>, DomainError> {
    let auth = state
        .identity
        .login(&request.username, &request.password)
        .await?;
    Ok(Json(TokenResponse {
        access_token: auth.token,
        token_type: auth.token_type,
        expires_in: auth.expires_in,
    }))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Authentication",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_current_user(AuthUser(user): AuthUser) -> Json<UserResponse> {
    Json(user.into())
}

#[utoipa::path(
    put,
    path = "/api/auth/me",
    tag = "Authentication",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 400, description = "Validation error or email in use"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_current_user(
    State(state): State<AuthHandlerState>,
    AuthUser(user): AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, DomainError> {
    let updated = state
        .identity
        .update_profile(&user, request.email, request.password)
        .await?;
    Ok(Json(updated.into()))
}
