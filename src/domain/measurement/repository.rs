use async_trait::async_trait;

use super::{CreateMeasurementDto, Measurement, MeasurementFilter};
use crate::domain::DomainResult;

#[async_trait]
pub trait MeasurementRepository: Send + Sync {
    /// Matching measurements, newest timestamp first, at most `filter.limit`
    async fn find(&self, filter: &MeasurementFilter) -> DomainResult<Vec<Measurement>>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Measurement>>;
    async fn count_for_series(&self, series_id: i32) -> DomainResult<u64>;

    async fn create(&self, dto: CreateMeasurementDto) -> DomainResult<Measurement>;
    async fn update(&self, measurement: &Measurement) -> DomainResult<Measurement>;
    async fn delete(&self, id: i32) -> DomainResult<bool>;
}
