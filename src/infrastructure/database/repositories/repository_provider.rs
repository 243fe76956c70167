//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::measurement::MeasurementRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::sensor::SensorRepository;
use crate::domain::series::SeriesRepository;
use crate::domain::user::UserRepository;

use super::measurement_repository::SeaOrmMeasurementRepository;
use super::sensor_repository::SeaOrmSensorRepository;
use super::series_repository::SeaOrmSeriesRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let series = repos.series().find_by_id(1).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    users: SeaOrmUserRepository,
    series: SeaOrmSeriesRepository,
    measurements: SeaOrmMeasurementRepository,
    sensors: SeaOrmSensorRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: SeaOrmUserRepository::new(db.clone()),
            series: SeaOrmSeriesRepository::new(db.clone()),
            measurements: SeaOrmMeasurementRepository::new(db.clone()),
            sensors: SeaOrmSensorRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn series(&self) -> &dyn SeriesRepository {
        &self.series
    }

    fn measurements(&self) -> &dyn MeasurementRepository {
        &self.measurements
    }

    fn sensors(&self) -> &dyn SensorRepository {
        &self.sensors
    }
}
