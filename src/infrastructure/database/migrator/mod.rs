//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users;
mod m20240101_000002_create_series;
mod m20240101_000003_create_measurements;
mod m20240101_000004_create_sensors;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users::Migration),
            Box::new(m20240101_000002_create_series::Migration),
            Box::new(m20240101_000003_create_measurements::Migration),
            Box::new(m20240101_000004_create_sensors::Migration),
        ]
    }
}
