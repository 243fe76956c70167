//! Sensor API handlers

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use super::dto::{CreateSensorRequest, SensorDataQuery, SensorResponse};
use crate::application::SensorService;
use crate::domain::DomainError;
use crate::interfaces::http::common::{ApiPath, ApiQuery, ValidatedJson};
use crate::interfaces::http::middleware::{AdminUser, SensorApiKey};
use crate::interfaces::http::modules::measurements::MeasurementResponse;

#[derive(Clone)]
pub struct SensorHandlerState {
    pub service: Arc<SensorService>,
}

#[utoipa::path(
    get,
    path = "/api/sensors",
    tag = "Sensors",
    responses(
        (status = 200, description = "All sensors, newest first", body = Vec<SensorResponse>),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin only")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_sensors(
    State(state): State<SensorHandlerState>,
    AdminUser(_admin): AdminUser,
) -> Result<Json<Vec<SensorResponse>>, DomainError> {
    let sensors = state.service.list().await?;
    Ok(Json(sensors.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/api/sensors",
    tag = "Sensors",
    request_body = CreateSensorRequest,
    responses(
        (status = 201, description = "Sensor registered; the response carries its API key", body = SensorResponse),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Series not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn register_sensor(
    State(state): State<SensorHandlerState>,
    AdminUser(_admin): AdminUser,
    ValidatedJson(request): ValidatedJson<CreateSensorRequest>,
) -> Result<(StatusCode, Json<SensorResponse>), DomainError> {
    let sensor = state
        .service
        .register(&request.name, request.series_id)
        .await?;
    Ok((StatusCode::CREATED, Json(sensor.into())))
}

#[utoipa::path(
    delete,
    path = "/api/sensors/{id}",
    tag = "Sensors",
    params(("id" = i32, Path, description = "Sensor ID")),
    responses(
        (status = 204, description = "Sensor deleted"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Sensor not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_sensor(
    State(state): State<SensorHandlerState>,
    AdminUser(_admin): AdminUser,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode, DomainError> {
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/sensors/data",
    tag = "Sensors",
    params(SensorDataQuery),
    responses(
        (status = 201, description = "Measurement recorded", body = MeasurementResponse),
        (status = 400, description = "Value out of series range"),
        (status = 401, description = "Missing or invalid API key"),
        (status = 403, description = "Sensor is not active")
    ),
    security(("api_key" = []))
)]
pub async fn submit_sensor_data(
    State(state): State<SensorHandlerState>,
    SensorApiKey(api_key): SensorApiKey,
    ApiQuery(query): ApiQuery<SensorDataQuery>,
) -> Result<(StatusCode, Json<MeasurementResponse>), DomainError> {
    let measurement = state
        .service
        .submit(&api_key, query.value, query.timestamp)
        .await?;
    Ok((StatusCode::CREATED, Json(measurement.into())))
}
