//! Measurement recording and querying

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::measurement::{CreateMeasurementDto, UpdateMeasurementDto};
use crate::domain::{
    DomainError, DomainResult, Measurement, MeasurementFilter, RepositoryProvider, User,
};

/// Input for a new measurement; `timestamp` defaults to now
#[derive(Debug, Clone)]
pub struct NewMeasurement {
    pub series_id: i32,
    pub value: f64,
    pub timestamp: Option<DateTime<Utc>>,
}

pub struct MeasurementService {
    repos: Arc<dyn RepositoryProvider>,
}

impl MeasurementService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list(&self, filter: &MeasurementFilter) -> DomainResult<Vec<Measurement>> {
        self.repos.measurements().find(filter).await
    }

    pub async fn get(&self, id: i32) -> DomainResult<Measurement> {
        self.repos
            .measurements()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Measurement", id))
    }

    /// Record a measurement on behalf of `author` (an admin).
    pub async fn create(&self, input: NewMeasurement, author: &User) -> DomainResult<Measurement> {
        let series = self
            .repos
            .series()
            .find_by_id(input.series_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Series", input.series_id))?;
        series.check_value(input.value)?;

        let measurement = self
            .repos
            .measurements()
            .create(CreateMeasurementDto {
                series_id: series.id,
                value: input.value,
                timestamp: input.timestamp.unwrap_or_else(Utc::now),
                created_by: Some(author.id),
            })
            .await?;

        debug!(measurement_id = measurement.id, series_id = series.id, "Measurement recorded");
        Ok(measurement)
    }

    /// Update value and/or timestamp; a new value is range-checked
    /// against the owning series.
    pub async fn update(&self, id: i32, dto: UpdateMeasurementDto) -> DomainResult<Measurement> {
        let mut measurement = self.get(id).await?;

        if let Some(value) = dto.value {
            let series = self
                .repos
                .series()
                .find_by_id(measurement.series_id)
                .await?
                .ok_or_else(|| DomainError::not_found("Series", measurement.series_id))?;
            series.check_value(value)?;
            measurement.value = value;
        }
        if let Some(timestamp) = dto.timestamp {
            measurement.timestamp = timestamp;
        }

        self.repos.measurements().update(&measurement).await
    }

    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        if !self.repos.measurements().delete(id).await? {
            return Err(DomainError::not_found("Measurement", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{repos, seed_series};
    use crate::domain::user::CreateUserDto;
    use chrono::{Duration, TimeZone};

    async fn admin(repos: &Arc<dyn RepositoryProvider>) -> User {
        repos
            .users()
            .create(CreateUserDto {
                username: "root".into(),
                email: "root@example.com".into(),
                password_hash: "x".into(),
                is_admin: true,
            })
            .await
            .unwrap()
    }

    fn at(minute: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap() + Duration::minutes(minute)
    }

    #[tokio::test]
    async fn value_must_be_within_series_range() {
        let repos = repos().await;
        let admin = admin(&repos).await;
        let series = seed_series(&repos, 0.0, 10.0).await;
        let svc = MeasurementService::new(repos);

        let err = svc
            .create(
                NewMeasurement {
                    series_id: series.id,
                    value: 15.0,
                    timestamp: None,
                },
                &admin,
            )
            .await
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::Validation("Value must be between 0 and 10".into())
        );

        let ok = svc
            .create(
                NewMeasurement {
                    series_id: series.id,
                    value: 5.0,
                    timestamp: None,
                },
                &admin,
            )
            .await
            .unwrap();
        assert_eq!(ok.value, 5.0);
        assert_eq!(ok.created_by, Some(admin.id));

        // Both bounds are inclusive
        for edge in [0.0, 10.0] {
            assert!(svc
                .create(
                    NewMeasurement {
                        series_id: series.id,
                        value: edge,
                        timestamp: None,
                    },
                    &admin,
                )
                .await
                .is_ok());
        }
    }

    #[tokio::test]
    async fn unknown_series_is_not_found() {
        let repos = repos().await;
        let admin = admin(&repos).await;
        let svc = MeasurementService::new(repos);

        let err = svc
            .create(
                NewMeasurement {
                    series_id: 99,
                    value: 1.0,
                    timestamp: None,
                },
                &admin,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Series", .. }));
    }

    #[tokio::test]
    async fn listing_is_newest_first_and_capped() {
        let repos = repos().await;
        let admin = admin(&repos).await;
        let series = seed_series(&repos, 0.0, 100.0).await;
        let svc = MeasurementService::new(repos);

        for minute in [3, 1, 5, 2, 4] {
            svc.create(
                NewMeasurement {
                    series_id: series.id,
                    value: minute as f64,
                    timestamp: Some(at(minute)),
                },
                &admin,
            )
            .await
            .unwrap();
        }

        let filter = MeasurementFilter::new(None, None, None, Some(2)).unwrap();
        let page = svc.list(&filter).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].timestamp, at(5));
        assert_eq!(page[1].timestamp, at(4));
    }

    #[tokio::test]
    async fn listing_filters_by_series_and_inclusive_dates() {
        let repos = repos().await;
        let admin = admin(&repos).await;
        let first = seed_series(&repos, 0.0, 100.0).await;
        let second = seed_series(&repos, 0.0, 100.0).await;
        let third = seed_series(&repos, 0.0, 100.0).await;
        let svc = MeasurementService::new(repos);

        for (series_id, minute) in [
            (first.id, 1),
            (first.id, 2),
            (second.id, 3),
            (third.id, 4),
            (first.id, 5),
        ] {
            svc.create(
                NewMeasurement {
                    series_id,
                    value: 1.0,
                    timestamp: Some(at(minute)),
                },
                &admin,
            )
            .await
            .unwrap();
        }

        let ids = format!("{},{}", first.id, second.id);
        let by_series = svc
            .list(&MeasurementFilter::new(Some(&ids), None, None, None).unwrap())
            .await
            .unwrap();
        assert_eq!(by_series.len(), 4);
        assert!(by_series.iter().all(|m| m.series_id != third.id));

        let window = svc
            .list(&MeasurementFilter::new(None, Some(at(2)), Some(at(4)), None).unwrap())
            .await
            .unwrap();
        let minutes: Vec<_> = window.iter().map(|m| m.timestamp).collect();
        assert_eq!(minutes, vec![at(4), at(3), at(2)]);
    }

    #[tokio::test]
    async fn update_rechecks_range_and_delete_removes_row() {
        let repos = repos().await;
        let admin = admin(&repos).await;
        let series = seed_series(&repos, 0.0, 10.0).await;
        let svc = MeasurementService::new(repos);

        let m = svc
            .create(
                NewMeasurement {
                    series_id: series.id,
                    value: 5.0,
                    timestamp: Some(at(0)),
                },
                &admin,
            )
            .await
            .unwrap();

        let err = svc
            .update(
                m.id,
                UpdateMeasurementDto {
                    value: Some(11.0),
                    timestamp: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let updated = svc
            .update(
                m.id,
                UpdateMeasurementDto {
                    value: Some(7.5),
                    timestamp: Some(at(10)),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.value, 7.5);
        assert_eq!(updated.timestamp, at(10));

        svc.delete(m.id).await.unwrap();
        assert!(matches!(svc.get(m.id).await, Err(DomainError::NotFound { .. })));
        assert!(matches!(svc.delete(m.id).await, Err(DomainError::NotFound { .. })));
    }
}
