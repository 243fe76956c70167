use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::db_err;
use crate::domain::measurement::{
    CreateMeasurementDto, Measurement, MeasurementFilter, MeasurementRepository,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::measurement;

pub struct SeaOrmMeasurementRepository {
    db: DatabaseConnection,
}

impl SeaOrmMeasurementRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn measurement_model_to_domain(model: measurement::Model) -> Measurement {
    Measurement {
        id: model.id,
        series_id: model.series_id,
        value: model.value,
        timestamp: model.timestamp,
        created_by: model.created_by,
    }
}

#[async_trait]
impl MeasurementRepository for SeaOrmMeasurementRepository {
    async fn find(&self, filter: &MeasurementFilter) -> DomainResult<Vec<Measurement>> {
        let mut query = measurement::Entity::find();

        if let Some(ids) = &filter.series_ids {
            query = query.filter(measurement::Column::SeriesId.is_in(ids.iter().copied()));
        }
        if let Some(start) = filter.start {
            query = query.filter(measurement::Column::Timestamp.gte(start));
        }
        if let Some(end) = filter.end {
            query = query.filter(measurement::Column::Timestamp.lte(end));
        }

        let models = query
            .order_by_desc(measurement::Column::Timestamp)
            .order_by_desc(measurement::Column::Id)
            .limit(filter.limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(measurement_model_to_domain).collect())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Measurement>> {
        let model = measurement::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(measurement_model_to_domain))
    }

    async fn count_for_series(&self, series_id: i32) -> DomainResult<u64> {
        measurement::Entity::find()
            .filter(measurement::Column::SeriesId.eq(series_id))
            .count(&self.db)
            .await
            .map_err(db_err)
    }

    async fn create(&self, dto: CreateMeasurementDto) -> DomainResult<Measurement> {
        let new_measurement = measurement::ActiveModel {
            series_id: Set(dto.series_id),
            value: Set(dto.value),
            timestamp: Set(dto.timestamp),
            created_by: Set(dto.created_by),
            ..Default::default()
        };

        let model = new_measurement.insert(&self.db).await.map_err(db_err)?;
        Ok(measurement_model_to_domain(model))
    }

    async fn update(&self, m: &Measurement) -> DomainResult<Measurement> {
        let existing = measurement::Entity::find_by_id(m.id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Measurement", m.id))?;

        let mut active: measurement::ActiveModel = existing.into();
        active.value = Set(m.value);
        active.timestamp = Set(m.timestamp);

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(measurement_model_to_domain(updated))
    }

    async fn delete(&self, id: i32) -> DomainResult<bool> {
        let result = measurement::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected > 0)
    }
}
