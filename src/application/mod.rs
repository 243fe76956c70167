//! Application layer - business rules and use cases

pub mod identity;
pub mod services;

pub use identity::{AuthResult, IdentityService};
pub use services::{MeasurementService, NewMeasurement, SensorService, SeriesService};

#[cfg(test)]
pub(crate) mod testing {
    //! Fixtures shared by service tests

    use std::sync::Arc;

    use crate::domain::series::{CreateSeriesDto, DEFAULT_COLOR};
    use crate::domain::{RepositoryProvider, Series};
    use crate::infrastructure::database::init_test_database;
    use crate::SeaOrmRepositoryProvider;

    pub async fn repos() -> Arc<dyn RepositoryProvider> {
        Arc::new(SeaOrmRepositoryProvider::new(init_test_database().await))
    }

    pub fn series_dto(name: &str, min_value: f64, max_value: f64) -> CreateSeriesDto {
        CreateSeriesDto {
            name: name.to_string(),
            description: None,
            min_value,
            max_value,
            color: DEFAULT_COLOR.to_string(),
            icon: None,
            unit: String::new(),
            created_by: None,
        }
    }

    pub async fn seed_series(repos: &Arc<dyn RepositoryProvider>, min: f64, max: f64) -> Series {
        repos
            .series()
            .create(series_dto("Temperature", min, max))
            .await
            .expect("series insert")
    }
}
