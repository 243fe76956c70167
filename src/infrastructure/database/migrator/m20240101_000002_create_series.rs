//! Create series table

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Series::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Series::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Series::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Series::Description).string_len(500).null())
                    .col(ColumnDef::new(Series::MinValue).double().not_null())
                    .col(ColumnDef::new(Series::MaxValue).double().not_null())
                    .col(
                        ColumnDef::new(Series::Color)
                            .string_len(7)
                            .not_null()
                            .default("#3B82F6"),
                    )
                    .col(ColumnDef::new(Series::Icon).string_len(50).null())
                    .col(
                        ColumnDef::new(Series::Unit)
                            .string_len(20)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Series::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Series::CreatedBy).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_series_created_by")
                            .from(Series::Table, Series::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Series::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Series {
    Table,
    Id,
    Name,
    Description,
    MinValue,
    MaxValue,
    Color,
    Icon,
    Unit,
    CreatedAt,
    CreatedBy,
}
