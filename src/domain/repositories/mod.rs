//! Repository provider: single access point to every aggregate repository

use super::measurement::MeasurementRepository;
use super::sensor::SensorRepository;
use super::series::SeriesRepository;
use super::user::UserRepository;

/// Exposes per-aggregate repositories backed by one connection pool.
pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn series(&self) -> &dyn SeriesRepository;
    fn measurements(&self) -> &dyn MeasurementRepository;
    fn sensors(&self) -> &dyn SensorRepository;
}
