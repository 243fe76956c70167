use chrono::{DateTime, Utc};

/// Sensor model
#[derive(Clone, Debug, PartialEq)]
pub struct Sensor {
    pub id: i32,
    pub name: String,
    pub api_key: String,
    pub series_id: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateSensorDto {
    pub name: String,
    pub api_key: String,
    pub series_id: i32,
}
