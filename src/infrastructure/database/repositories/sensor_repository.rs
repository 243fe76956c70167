use async_trait::async_trait;
use chrono::Utc;
use sea_orm::prelude::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::{db_err, unique_or_db_err};
use crate::domain::sensor::{CreateSensorDto, Sensor, SensorRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::sensor;

pub struct SeaOrmSensorRepository {
    db: DatabaseConnection,
}

impl SeaOrmSensorRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn sensor_model_to_domain(model: sensor::Model) -> Sensor {
    Sensor {
        id: model.id,
        name: model.name,
        api_key: model.api_key,
        series_id: model.series_id,
        is_active: model.is_active,
        created_at: model.created_at,
    }
}

#[async_trait]
impl SensorRepository for SeaOrmSensorRepository {
    async fn find_all(&self) -> DomainResult<Vec<Sensor>> {
        let models = sensor::Entity::find()
            .order_by_desc(sensor::Column::CreatedAt)
            .order_by_desc(sensor::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(sensor_model_to_domain).collect())
    }

    async fn find_by_api_key(&self, api_key: &str) -> DomainResult<Option<Sensor>> {
        let model = sensor::Entity::find()
            .filter(sensor::Column::ApiKey.eq(api_key))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(sensor_model_to_domain))
    }

    async fn create(&self, dto: CreateSensorDto) -> DomainResult<Sensor> {
        let new_sensor = sensor::ActiveModel {
            name: Set(dto.name),
            api_key: Set(dto.api_key),
            series_id: Set(dto.series_id),
            is_active: Set(true),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let model = new_sensor
            .insert(&self.db)
            .await
            .map_err(|e| unique_or_db_err(e, "API key collision, retry"))?;
        Ok(sensor_model_to_domain(model))
    }

    async fn set_active(&self, id: i32, is_active: bool) -> DomainResult<bool> {
        let result = sensor::Entity::update_many()
            .filter(sensor::Column::Id.eq(id))
            .col_expr(sensor::Column::IsActive, Expr::value(is_active))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: i32) -> DomainResult<bool> {
        let result = sensor::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected > 0)
    }
}
