//! Create refunds table
//!
//! Refunds outlive their reservation: the reference is set to NULL on delete.

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
                    .table(Refunds::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Refunds::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Refunds::ReservationId).integer())
                    .col(ColumnDef::new(Refunds::RequestedBy).integer().not_null())
                    .col(ColumnDef::new(Refunds::Amount).big_integer().not_null())
                    .col(
                        ColumnDef::new(Refunds::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Refunds::Reason).text().not_null().default(""))
                    .col(
                        ColumnDef::new(Refunds::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Refunds::ProcessedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_refunds_reservation")
                            .from(Refunds::Table, Refunds::ReservationId)
                            .to(Reservations::Table, Reservations::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_refunds_requested_by")
                    .table(Refunds::Table)
                    .col(Refunds::RequestedBy)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Refunds::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Refunds {
    Table,
    Id,
    ReservationId,
    RequestedBy,
    Amount,
    Status,
    Reason,
    CreatedAt,
    ProcessedAt,
}
