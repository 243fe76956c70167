//! Measurement API handlers

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use super::dto::{
    CreateMeasurementRequest, MeasurementQuery, MeasurementResponse, UpdateMeasurementRequest,
};
use crate::application::MeasurementService;
use crate::domain::DomainError;
use crate::interfaces::http::common::{ApiPath, ApiQuery, ValidatedJson};
use crate::interfaces::http::middleware::AdminUser;

#[derive(Clone)]
pub struct MeasurementHandlerState {
    pub service: Arc<MeasurementService>,
}

#[utoipa::path(
    get,
    path = "/api/measurements",
    tag = "Measurements",
    params(MeasurementQuery),
    responses(
        (status = 200, description = "Matching measurements, newest first", body = Vec<MeasurementResponse>),
        (status = 400, description = "Invalid filter")
    )
)]
pub async fn list_measurements(
    State(state): State<MeasurementHandlerState>,
    ApiQuery(query): ApiQuery<MeasurementQuery>,
) -> Result<Json<Vec<MeasurementResponse>>, DomainError> {
    let filter = query.into_filter()?;
    let measurements = state.service.list(&filter).await?;
    Ok(Json(measurements.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/measurements/{id}",
    tag = "Measurements",
    params(("id" = i32, Path, description = "Measurement ID")),
    responses(
        (status = 200, description = "Measurement", body = MeasurementResponse),
        (status = 404, description = "Measurement not found")
    )
)]
pub async fn get_measurement(
    State(state): State<MeasurementHandlerState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<MeasurementResponse>, DomainError> {
    let measurement = state.service.get(id).await?;
    Ok(Json(measurement.into()))
}

#[utoipa::path(
    post,
    path = "/api/measurements",
    tag = "Measurements",
    request_body = CreateMeasurementRequest,
    responses(
        (status = 201, description = "Measurement recorded", body = MeasurementResponse),
        (status = 400, description = "Value out of series range"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Series not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_measurement(
    State(state): State<MeasurementHandlerState>,
    AdminUser(admin): AdminUser,
    ValidatedJson(request): ValidatedJson<CreateMeasurementRequest>,
) -> Result<(StatusCode, Json<MeasurementResponse>), DomainError> {
    let measurement = state.service.create(request.into(), &admin).await?;
    Ok((StatusCode::CREATED, Json(measurement.into())))
}

#[utoipa::path(
    put,
    path = "/api/measurements/{id}",
    tag = "Measurements",
    params(("id" = i32, Path, description = "Measurement ID")),
    request_body = UpdateMeasurementRequest,
    responses(
        (status = 200, description = "Measurement updated", body = MeasurementResponse),
        (status = 400, description = "Value out of series range"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Measurement not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_measurement(
    State(state): State<MeasurementHandlerState>,
    AdminUser(_admin): AdminUser,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(request): ValidatedJson<UpdateMeasurementRequest>,
) -> Result<Json<MeasurementResponse>, DomainError> {
    let measurement = state.service.update(id, request.into()).await?;
    Ok(Json(measurement.into()))
}

#[utoipa::path(
    delete,
    path = "/api/measurements/{id}",
    tag = "Measurements",
    params(("id" = i32, Path, description = "Measurement ID")),
    responses(
        (status = 204, description = "Measurement deleted"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Measurement not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_measurement(
    State(state): State<MeasurementHandlerState>,
    AdminUser(_admin): AdminUser,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode, DomainError> {
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
