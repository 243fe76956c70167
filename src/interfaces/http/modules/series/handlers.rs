//! Series API handlers

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use super::dto::{CreateSeriesRequest, SeriesResponse, UpdateSeriesRequest};
use crate::application::SeriesService;
use crate::domain::DomainError;
use crate::interfaces::http::common::{ApiPath, ValidatedJson};
use crate::interfaces::http::middleware::AdminUser;

#[derive(Clone)]
pub struct SeriesHandlerState {
    pub service: Arc<SeriesService>,
}

#[utoipa::path(
    get,
    path = "/api/series",
    tag = "Series",
    responses(
        (status = 200, description = "All series, newest first", body = Vec<SeriesResponse>)
    )
)]
pub async fn list_series(
    State(state): State<SeriesHandlerState>,
) -> Result<Json<Vec<SeriesResponse>>, DomainError> {
    let series = state.service.list().await?;
    Ok(Json(series.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/series/{id}",
    tag = "Series",
    params(("id" = i32, Path, description = "Series ID")),
    responses(
        (status = 200, description = "Series details", body = SeriesResponse),
        (status = 404, description = "Series not found")
    )
)]
pub async fn get_series(
    State(state): State<SeriesHandlerState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<SeriesResponse>, DomainError> {
    let series = state.service.get(id).await?;
    Ok(Json(series.into()))
}

#[utoipa::path(
    post,
    path = "/api/series",
    tag = "Series",
    request_body = CreateSeriesRequest,
    responses(
        (status = 201, description = "Series created", body = SeriesResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin only")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_series(
    State(state): State<SeriesHandlerState>,
    AdminUser(admin): AdminUser,
    ValidatedJson(request): ValidatedJson<CreateSeriesRequest>,
) -> Result<(StatusCode, Json<SeriesResponse>), DomainError> {
    let series = state.service.create(request.into_dto(admin.id)).await?;
    Ok((StatusCode::CREATED, Json(series.into())))
}

#[utoipa::path(
    put,
    path = "/api/series/{id}",
    tag = "Series",
    params(("id" = i32, Path, description = "Series ID")),
    request_body = UpdateSeriesRequest,
    responses(
        (status = 200, description = "Series updated", body = SeriesResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Series not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_series(
    State(state): State<SeriesHandlerState>,
    AdminUser(_admin): AdminUser,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(request): ValidatedJson<UpdateSeriesRequest>,
) -> Result<Json<SeriesResponse>, DomainError> {
    let series = state.service.update(id, request.into()).await?;
    Ok(Json(series.into()))
}

#[utoipa::path(
    delete,
    path = "/api/series/{id}",
    tag = "Series",
    params(("id" = i32, Path, description = "Series ID")),
    responses(
        (status = 204, description = "Series and its measurements and sensors deleted"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Series not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_series(
    State(state): State<SeriesHandlerState>,
    AdminUser(_admin): AdminUser,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode, DomainError> {
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
