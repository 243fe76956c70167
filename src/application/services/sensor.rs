//! Sensor registration and API-key data submission

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::domain::measurement::CreateMeasurementDto;
use crate::domain::sensor::CreateSensorDto;
use crate::domain::{DomainError, DomainResult, Measurement, RepositoryProvider, Sensor};
use crate::infrastructure::crypto::api_key::generate_api_key;

pub struct SensorService {
    repos: Arc<dyn RepositoryProvider>,
}

impl SensorService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list(&self) -> DomainResult<Vec<Sensor>> {
        self.repos.sensors().find_all().await
    }

    /// Register a sensor bound to `series_id` and mint its API key.
    pub async fn register(&self, name: &str, series_id: i32) -> DomainResult<Sensor> {
        if self.repos.series().find_by_id(series_id).await?.is_none() {
            return Err(DomainError::not_found("Series", series_id));
        }

        let sensor = self
            .repos
            .sensors()
            .create(CreateSensorDto {
                name: name.to_string(),
                api_key: generate_api_key(),
                series_id,
            })
            .await?;

        info!(sensor_id = sensor.id, series_id, name = %sensor.name, "Sensor registered");
        Ok(sensor)
    }

    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        if !self.repos.sensors().delete(id).await? {
            return Err(DomainError::not_found("Sensor", id));
        }
        info!(sensor_id = id, "Sensor deleted");
        Ok(())
    }

    /// Record a value pushed by the sensor owning `api_key`.
    pub async fn submit(
        &self,
        api_key: &str,
        value: f64,
        timestamp: Option<DateTime<Utc>>,
    ) -> DomainResult<Measurement> {
        let Some(sensor) = self.repos.sensors().find_by_api_key(api_key).await? else {
            warn!("Rejected sensor submission with unknown API key");
            return Err(DomainError::Unauthorized("Invalid API key".into()));
        };

        if !sensor.is_active {
            warn!(sensor_id = sensor.id, "Rejected submission from inactive sensor");
            return Err(DomainError::Forbidden("Sensor is not active".into()));
        }

        let series = self
            .repos
            .series()
            .find_by_id(sensor.series_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Series", sensor.series_id))?;
        series.check_value(value)?;

        let measurement = self
            .repos
            .measurements()
            .create(CreateMeasurementDto {
                series_id: series.id,
                value,
                timestamp: timestamp.unwrap_or_else(Utc::now),
                created_by: None,
            })
            .await?;

        debug!(sensor_id = sensor.id, measurement_id = measurement.id, value, "Sensor data stored");
        Ok(measurement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{repos, seed_series};
    use crate::infrastructure::crypto::api_key::API_KEY_PREFIX;

    #[tokio::test]
    async fn register_requires_existing_series() {
        let svc = SensorService::new(repos().await);
        let err = svc.register("probe", 7).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Series", .. }));
    }

    #[tokio::test]
    async fn registered_sensor_gets_unique_active_key() {
        let repos = repos().await;
        let series = seed_series(&repos, 0.0, 10.0).await;
        let svc = SensorService::new(repos);

        let a = svc.register("a", series.id).await.unwrap();
        let b = svc.register("b", series.id).await.unwrap();
        assert!(a.is_active);
        assert!(a.api_key.starts_with(API_KEY_PREFIX));
        assert_ne!(a.api_key, b.api_key);

        let listed = svc.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, b.id);
    }

    #[tokio::test]
    async fn submit_stores_measurement_without_author() {
        let repos = repos().await;
        let series = seed_series(&repos, 0.0, 10.0).await;
        let svc = SensorService::new(repos.clone());
        let sensor = svc.register("probe", series.id).await.unwrap();

        let m = svc.submit(&sensor.api_key, 4.2, None).await.unwrap();
        assert_eq!(m.series_id, series.id);
        assert_eq!(m.value, 4.2);
        assert_eq!(m.created_by, None);

        let err = svc.submit(&sensor.api_key, 42.0, None).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(repos.measurements().count_for_series(series.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn unknown_key_is_unauthorized() {
        let svc = SensorService::new(repos().await);
        assert_eq!(
            svc.submit("msk_nope", 1.0, None).await.unwrap_err(),
            DomainError::Unauthorized("Invalid API key".into())
        );
    }

    #[tokio::test]
    async fn inactive_sensor_is_forbidden() {
        let repos = repos().await;
        let series = seed_series(&repos, 0.0, 10.0).await;
        let svc = SensorService::new(repos.clone());
        let sensor = svc.register("probe", series.id).await.unwrap();

        assert!(repos.sensors().set_active(sensor.id, false).await.unwrap());
        assert_eq!(
            svc.submit(&sensor.api_key, 1.0, None).await.unwrap_err(),
            DomainError::Forbidden("Sensor is not active".into())
        );
    }

    #[tokio::test]
    async fn delete_removes_only_the_sensor() {
        let repos = repos().await;
        let series = seed_series(&repos, 0.0, 10.0).await;
        let svc = SensorService::new(repos.clone());
        let sensor = svc.register("probe", series.id).await.unwrap();
        svc.submit(&sensor.api_key, 1.0, None).await.unwrap();

        svc.delete(sensor.id).await.unwrap();
        assert!(svc.list().await.unwrap().is_empty());
        assert_eq!(repos.measurements().count_for_series(series.id).await.unwrap(), 1);
        assert!(matches!(svc.delete(sensor.id).await, Err(DomainError::NotFound { .. })));
    }
}
