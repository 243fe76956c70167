use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::debug;

use super::db_err;
use crate::domain::series::{CreateSeriesDto, Series, SeriesRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{measurement, sensor, series};

pub struct SeaOrmSeriesRepository {
    db: DatabaseConnection,
}

impl SeaOrmSeriesRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn series_model_to_domain(model: series::Model) -> Series {
    Series {
        id: model.id,
        name: model.name,
        description: model.description,
        min_value: model.min_value,
        max_value: model.max_value,
        color: model.color,
        icon: model.icon,
        unit: model.unit,
        created_at: model.created_at,
        created_by: model.created_by,
    }
}

#[async_trait]
impl SeriesRepository for SeaOrmSeriesRepository {
    async fn find_all(&self) -> DomainResult<Vec<Series>> {
        let models = series::Entity::find()
            .order_by_desc(series::Column::CreatedAt)
            .order_by_desc(series::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(series_model_to_domain).collect())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Series>> {
        let model = series::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(series_model_to_domain))
    }

    async fn create(&self, dto: CreateSeriesDto) -> DomainResult<Series> {
        let new_series = series::ActiveModel {
            name: Set(dto.name),
            description: Set(dto.description),
            min_value: Set(dto.min_value),
            max_value: Set(dto.max_value),
            color: Set(dto.color),
            icon: Set(dto.icon),
            unit: Set(dto.unit),
            created_at: Set(Utc::now()),
            created_by: Set(dto.created_by),
            ..Default::default()
        };

        let model = new_series.insert(&self.db).await.map_err(db_err)?;
        Ok(series_model_to_domain(model))
    }

    async fn update(&self, s: &Series) -> DomainResult<Series> {
        let existing = series::Entity::find_by_id(s.id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Series", s.id))?;

        let mut active: series::ActiveModel = existing.into();
        active.name = Set(s.name.clone());
        active.description = Set(s.description.clone());
        active.min_value = Set(s.min_value);
        active.max_value = Set(s.max_value);
        active.color = Set(s.color.clone());
        active.icon = Set(s.icon.clone());
        active.unit = Set(s.unit.clone());

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(series_model_to_domain(updated))
    }

    async fn delete(&self, id: i32) -> DomainResult<bool> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let measurements = measurement::Entity::delete_many()
            .filter(measurement::Column::SeriesId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err)?;
        let sensors = sensor::Entity::delete_many()
            .filter(sensor::Column::SeriesId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err)?;
        let result = series::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            txn.rollback().await.map_err(db_err)?;
            return Ok(false);
        }

        txn.commit().await.map_err(db_err)?;
        debug!(
            series_id = id,
            measurements = measurements.rows_affected,
            sensors = sensors.rows_affected,
            "Series deleted with dependents"
        );
        Ok(true)
    }
}
