//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{IdentityService, MeasurementService, SensorService, SeriesService};
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::SeaOrmRepositoryProvider;

use super::middleware::{resolve_caller, AuthState};
use super::modules::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use super::modules::request_id::request_id_middleware;
use super::modules::{auth, health, measurements, sensors, series};

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from POST /api/auth/login"))
                        .build(),
                ),
            );
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("X-API-Key"))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::banner,
        health::health_check,
        auth::register,
        auth::login,
        auth::get_current_user,
        auth::update_current_user,
        series::list_series,
        series::get_series,
        series::create_series,
        series::update_series,
        series::delete_series,
        measurements::list_measurements,
        measurements::get_measurement,
        measurements::create_measurement,
        measurements::update_measurement,
        measurements::delete_measurement,
        sensors::list_sensors,
        sensors::register_sensor,
        sensors::delete_sensor,
        sensors::submit_sensor_data,
    ),
    components(
        schemas(
            super::common::ErrorResponse,
            health::BannerResponse,
            health::HealthResponse,
            health::ComponentHealth,
            auth::RegisterRequest,
            auth::LoginRequest,
            auth::TokenResponse,
            auth::UpdateProfileRequest,
            auth::UserResponse,
            series::CreateSeriesRequest,
            series::UpdateSeriesRequest,
            series::SeriesResponse,
            measurements::CreateMeasurementRequest,
            measurements::UpdateMeasurementRequest,
            measurements::MeasurementResponse,
            sensors::CreateSensorRequest,
            sensors::SensorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service banner and health check"),
        (name = "Authentication", description = "Registration, login (JWT) and profile"),
        (name = "Series", description = "Measurement series with a valid value range"),
        (name = "Measurements", description = "Timestamped values recorded against a series"),
        (name = "Sensors", description = "API-key sensors pushing measurements"),
    ),
    info(
        title = "Measures Data Collection API",
        version = "1.0.0",
        description = "REST API for collecting measurement series from users and sensors",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Build the full HTTP application.
pub fn create_api_router(
    db: DatabaseConnection,
    jwt_config: JwtConfig,
    metrics_handle: PrometheusHandle,
) -> Router {
    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
    let identity = Arc::new(IdentityService::new(repos.clone(), jwt_config));

    let auth_state = AuthState {
        identity: identity.clone(),
    };

    let auth_routes = Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route(
            "/api/auth/me",
            get(auth::get_current_user).put(auth::update_current_user),
        )
        .with_state(auth::AuthHandlerState { identity });

    let series_state = series::SeriesHandlerState {
        service: Arc::new(SeriesService::new(repos.clone())),
    };
    let series_collection = get(series::list_series).post(series::create_series);
    let series_routes = Router::new()
        .route("/api/series", series_collection.clone())
        .route("/api/series/", series_collection)
        .route(
            "/api/series/{id}",
            get(series::get_series)
                .put(series::update_series)
                .delete(series::delete_series),
        )
        .with_state(series_state);

    let measurement_state = measurements::MeasurementHandlerState {
        service: Arc::new(MeasurementService::new(repos.clone())),
    };
    let measurement_collection =
        get(measurements::list_measurements).post(measurements::create_measurement);
    let measurement_routes = Router::new()
        .route("/api/measurements", measurement_collection.clone())
        .route("/api/measurements/", measurement_collection)
        .route(
            "/api/measurements/{id}",
            get(measurements::get_measurement)
                .put(measurements::update_measurement)
                .delete(measurements::delete_measurement),
        )
        .with_state(measurement_state);

    let sensor_state = sensors::SensorHandlerState {
        service: Arc::new(SensorService::new(repos)),
    };
    let sensor_collection = get(sensors::list_sensors).post(sensors::register_sensor);
    let sensor_routes = Router::new()
        .route("/api/sensors", sensor_collection.clone())
        .route("/api/sensors/", sensor_collection)
        .route(
            "/api/sensors/{id}",
            axum::routing::delete(sensors::delete_sensor),
        )
        .with_state(sensor_state.clone());

    // Bearer-token routes share one caller-resolution layer
    let user_api = Router::new()
        .merge(auth_routes)
        .merge(series_routes)
        .merge(measurement_routes)
        .merge(sensor_routes)
        .layer(middleware::from_fn_with_state(auth_state, resolve_caller));

    // Sensor submission authenticates by X-API-Key only
    let sensor_data_routes = Router::new()
        .route("/api/sensors/data", post(sensors::submit_sensor_data))
        .with_state(sensor_state);

    let health_routes = Router::new()
        .route("/", get(health::banner))
        .route("/api/health", get(health::health_check))
        .with_state(health::HealthState {
            db,
            started_at: Arc::new(Instant::now()),
        });

    let metrics_routes = Router::new()
        .route("/metrics", get(prometheus_metrics))
        .with_state(MetricsState {
            handle: metrics_handle,
        });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .merge(health_routes)
        .merge(metrics_routes)
        .merge(user_api)
        .merge(sensor_data_routes)
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
