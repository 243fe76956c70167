//! Series DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::domain::series::{CreateSeriesDto, UpdateSeriesDto, DEFAULT_COLOR};
use crate::domain::Series;

/// `#RRGGBB`
fn validate_color(color: &str) -> Result<(), ValidationError> {
    let hex = color.strip_prefix('#').unwrap_or_default();
    if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(())
    } else {
        Err(ValidationError::new("color").with_message("color must look like #RRGGBB".into()))
    }
}

/// Present-but-null becomes `Some(None)`; an absent field stays `None`
/// through `#[serde(default)]`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSeriesRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: Option<String>,
    pub min_value: f64,
    pub max_value: f64,
    #[serde(default = "default_color")]
    #[validate(custom(function = "validate_color"))]
    #[schema(example = "#3B82F6")]
    pub color: String,
    #[validate(length(max = 50, message = "icon must be at most 50 characters"))]
    pub icon: Option<String>,
    #[serde(default)]
    #[validate(length(max = 20, message = "unit must be at most 20 characters"))]
    pub unit: String,
}

impl CreateSeriesRequest {
    pub fn into_dto(self, created_by: i32) -> CreateSeriesDto {
        CreateSeriesDto {
            name: self.name,
            description: self.description,
            min_value: self.min_value,
            max_value: self.max_value,
            color: self.color,
            icon: self.icon,
            unit: self.unit,
            created_by: Some(created_by),
        }
    }
}

/// Partial update; omitted fields keep their value, and `null` clears
/// `description` or `icon`
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateSeriesRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: Option<Option<String>>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    #[validate(custom(function = "validate_color"))]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    #[validate(length(max = 50, message = "icon must be at most 50 characters"))]
    pub icon: Option<Option<String>>,
    #[validate(length(max = 20, message = "unit must be at most 20 characters"))]
    pub unit: Option<String>,
}

impl From<UpdateSeriesRequest> for UpdateSeriesDto {
    fn from(req: UpdateSeriesRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            min_value: req.min_value,
            max_value: req.max_value,
            color: req.color,
            icon: req.icon,
            unit: req.unit,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SeriesResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub min_value: f64,
    pub max_value: f64,
    pub color: String,
    pub icon: Option<String>,
    pub unit: String,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<i32>,
}

impl From<Series> for SeriesResponse {
    fn from(s: Series) -> Self {
        Self {
            id: s.id,
            name: s.name,
            description: s.description,
            min_value: s.min_value,
            max_value: s.max_value,
            color: s.color,
            icon: s.icon,
            unit: s.unit,
            created_at: s.created_at,
            created_by: s.created_by,
        }
    }
}
