use async_trait::async_trait;

use super::{CreateSeriesDto, Series};
use crate::domain::DomainResult;

#[async_trait]
pub trait SeriesRepository: Send + Sync {
    /// All series, newest first
    async fn find_all(&self) -> DomainResult<Vec<Series>>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Series>>;

    async fn create(&self, dto: CreateSeriesDto) -> DomainResult<Series>;
    /// Persist every mutable field of `series`
    async fn update(&self, series: &Series) -> DomainResult<Series>;

    /// Delete the series together with its measurements and sensors.
    /// Returns `false` when no series had this id.
    async fn delete(&self, id: i32) -> DomainResult<bool>;
}
