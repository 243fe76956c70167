use async_trait::async_trait;

use super::{CreateSensorDto, Sensor};
use crate::domain::DomainResult;

#[async_trait]
pub trait SensorRepository: Send + Sync {
    /// All sensors, newest first
    async fn find_all(&self) -> DomainResult<Vec<Sensor>>;
    async fn find_by_api_key(&self, api_key: &str) -> DomainResult<Option<Sensor>>;

    async fn create(&self, dto: CreateSensorDto) -> DomainResult<Sensor>;
    async fn set_active(&self, id: i32, is_active: bool) -> DomainResult<bool>;
    async fn delete(&self, id: i32) -> DomainResult<bool>;
}
