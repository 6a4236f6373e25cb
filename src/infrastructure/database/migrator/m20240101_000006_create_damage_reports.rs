//! Create damage_reports table

use sea_orm_migration::prelude::*;

use super::m20240101_000003_create_reservations::Reservations;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DamageReports::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DamageReports::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DamageReports::ReservationId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DamageReports::Description).text().not_null())
                    .col(
                        ColumnDef::new(DamageReports::RepairCost)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DamageReports::Status)
                            .string_len(20)
                            .not_null()
                            .default("reported"),
                    )
                    .col(
                        ColumnDef::new(DamageReports::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DamageReports::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_damage_reports_reservation")
                            .from(DamageReports::Table, DamageReports::ReservationId)
                            .to(Reservations::Table, Reservations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_damage_reports_reservation")
                    .table(DamageReports::Table)
                    .col(DamageReports::ReservationId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DamageReports::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum DamageReports {
    Table,
    Id,
    ReservationId,
    Description,
    RepairCost,
    Status,
    CreatedAt,
    UpdatedAt,
}
