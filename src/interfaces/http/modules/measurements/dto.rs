//! Measurement DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::measurement::{MeasurementFilter, UpdateMeasurementDto};
use crate::domain::{DomainResult, Measurement};
use crate::application::NewMeasurement;
use crate::interfaces::http::common::timestamp;

/// Query parameters for `GET /api/measurements`
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MeasurementQuery {
    /// Comma-separated series IDs, e.g. `1,2,5`
    pub series_ids: Option<String>,
    /// Inclusive lower bound on timestamp (ISO 8601; no offset means UTC)
    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub start_date: Option<DateTime<Utc>>,
    /// Inclusive upper bound on timestamp (ISO 8601; no offset means UTC)
    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub end_date: Option<DateTime<Utc>>,
    /// Result cap, 1-10000. Default: 1000
    pub limit: Option<i64>,
}

impl MeasurementQuery {
    pub fn into_filter(self) -> DomainResult<MeasurementFilter> {
        MeasurementFilter::new(
            self.series_ids.as_deref(),
            self.start_date,
            self.end_date,
            self.limit,
        )
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMeasurementRequest {
    pub series_id: i32,
    pub value: f64,
    /// Defaults to the time of the request
    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    #[schema(value_type = Option<String>, example = "2024-01-01T12:00:00Z")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl From<CreateMeasurementRequest> for NewMeasurement {
    fn from(req: CreateMeasurementRequest) -> Self {
        Self {
            series_id: req.series_id,
            value: req.value,
            timestamp: req.timestamp,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateMeasurementRequest {
    pub value: Option<f64>,
    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    #[schema(value_type = Option<String>, example = "2024-01-01T12:00:00Z")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl From<UpdateMeasurementRequest> for UpdateMeasurementDto {
    fn from(req: UpdateMeasurementRequest) -> Self {
        Self {
            value: req.value,
            timestamp: req.timestamp,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MeasurementResponse {
    pub id: i32,
    pub series_id: i32,
    pub value: f64,
    pub timestamp: DateTime<Utc>,
    pub created_by: Option<i32>,
}

impl From<Measurement> for MeasurementResponse {
    fn from(m: Measurement) -> Self {
        Self {
            id: m.id,
            series_id: m.series_id,
            value: m.value,
            timestamp: m.timestamp,
            created_by: m.created_by,
        }
    }
}
