//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users;
mod m20240101_000002_create_vehicles;
mod m20240101_000003_create_reservations;
mod m20240101_000004_create_payments;
mod m20240101_000005_create_refunds;
mod m20240101_000006_create_damage_reports;
mod m20240101_000007_create_insurances;
mod m20240101_000008_create_favorites;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users::Migration),
            Box::new(m20240101_000002_create_vehicles::Migration),
            Box::new(m20240101_000003_create_reservations::Migration),
            Box::new(m20240101_000004_create_payments::Migration),
            Box::new(m20240101_000005_create_refunds::Migration),
            Box::new(m20240101_000006_create_damage_reports::Migration),
            Box::new(m20240101_000007_create_insurances::Migration),
            Box::new(m20240101_000008_create_favorites::Migration),
        ]
    }
}
