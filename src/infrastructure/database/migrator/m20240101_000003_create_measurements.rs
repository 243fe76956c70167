//! Create measurements table

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users::Users;
use super::m20240101_000002_create_series::Series;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Measurements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Measurements::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Measurements::SeriesId).integer().not_null())
                    .col(ColumnDef::new(Measurements::Value).double().not_null())
                    .col(
                        ColumnDef::new(Measurements::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Measurements::CreatedBy).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_measurements_series")
                            .from(Measurements::Table, Measurements::SeriesId)
                            .to(Series::Table, Series::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_measurements_created_by")
                            .from(Measurements::Table, Measurements::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_measurements_series_id")
                    .table(Measurements::Table)
                    .col(Measurements::SeriesId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_measurements_timestamp")
                    .table(Measurements::Table)
                    .col(Measurements::Timestamp)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Measurements::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Measurements {
    Table,
    Id,
    SeriesId,
    Value,
    Timestamp,
    CreatedBy,
}
