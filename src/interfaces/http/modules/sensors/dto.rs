//! Sensor DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::Sensor;
use crate::interfaces::http::common::timestamp;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSensorRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    pub series_id: i32,
}

/// Sensor record including its API key (admin view)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SensorResponse {
    pub id: i32,
    pub name: String,
    pub api_key: String,
    pub series_id: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Sensor> for SensorResponse {
    fn from(s: Sensor) -> Self {
        Self {
            id: s.id,
            name: s.name,
            api_key: s.api_key,
            series_id: s.series_id,
            is_active: s.is_active,
            created_at: s.created_at,
        }
    }
}

/// Query parameters for `POST /api/sensors/data`
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SensorDataQuery {
    pub value: f64,
    /// Defaults to the time of the request (ISO 8601; no offset means UTC)
    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub timestamp: Option<DateTime<Utc>>,
}
