//! Create insurances table

use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_vehicles::Vehicles;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Insurances::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Insurances::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Insurances::VehicleId).integer().not_null())
                    .col(ColumnDef::new(Insurances::Provider).string().not_null())
                    .col(ColumnDef::new(Insurances::Kind).string_len(20).not_null())
                    .col(ColumnDef::new(Insurances::ExpiryDate).date().not_null())
                    .col(
                        ColumnDef::new(Insurances::CoverageAmount)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_insurances_vehicle")
                            .from(Insurances::Table, Insurances::VehicleId)
                            .to(Vehicles::Table, Vehicles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Insurances::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Insurances {
    Table,
    Id,
    VehicleId,
    Provider,
    Kind,
    ExpiryDate,
    CoverageAmount,
}
