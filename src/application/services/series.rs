//! Series management

use std::sync::Arc;

use tracing::info;

use crate::domain::series::{validate_bounds, CreateSeriesDto, UpdateSeriesDto};
use crate::domain::{DomainError, DomainResult, RepositoryProvider, Series};

pub struct SeriesService {
    repos: Arc<dyn RepositoryProvider>,
}

impl SeriesService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list(&self) -> DomainResult<Vec<Series>> {
        self.repos.series().find_all().await
    }

    pub async fn get(&self, id: i32) -> DomainResult<Series> {
        self.repos
            .series()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Series", id))
    }

    pub async fn create(&self, dto: CreateSeriesDto) -> DomainResult<Series> {
        validate_bounds(dto.min_value, dto.max_value)?;
        let series = self.repos.series().create(dto).await?;
        info!(series_id = series.id, name = %series.name, "Series created");
        Ok(series)
    }

    /// Apply a partial update; the bounds are checked on the merged result.
    pub async fn update(&self, id: i32, dto: UpdateSeriesDto) -> DomainResult<Series> {
        let current = self.get(id).await?;
        let merged = dto.merge_into(&current);
        validate_bounds(merged.min_value, merged.max_value)?;
        self.repos.series().update(&merged).await
    }

    /// Delete a series along with its measurements and sensors.
    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        if !self.repos.series().delete(id).await? {
            return Err(DomainError::not_found("Series", id));
        }
        info!(series_id = id, "Series deleted");
        Ok(())
    }
}
