//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::damage::DamageRepository;
use crate::domain::insurance::InsuranceRepository;
use crate::domain::payment::PaymentRepository;
use crate::domain::refund::RefundRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::reservation::ReservationRepository;
use crate::domain::user::UserRepository;
use crate::domain::vehicle::VehicleRepository;

use super::damage_repository::SeaOrmDamageRepository;
use super::insurance_repository::SeaOrmInsuranceRepository;
use super::payment_repository::SeaOrmPaymentRepository;
use super::refund_repository::SeaOrmRefundRepository;
use super::reservation_repository::SeaOrmReservationRepository;
use super::user_repository::SeaOrmUserRepository;
use super::vehicle_repository::SeaOrmVehicleRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let vehicle = repos.vehicles().find_by_id(3).await?;
/// let conflicts = repos.reservations().find_conflicts(3, &period).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    users: SeaOrmUserRepository,
    vehicles: SeaOrmVehicleRepository,
    insurances: SeaOrmInsuranceRepository,
    reservations: SeaOrmReservationRepository,
    payments: SeaOrmPaymentRepository,
    refunds: SeaOrmRefundRepository,
    damage_reports: SeaOrmDamageRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: SeaOrmUserRepository::new(db.clone()),
            vehicles: SeaOrmVehicleRepository::new(db.clone()),
            insurances: SeaOrmInsuranceRepository::new(db.clone()),
            reservations: SeaOrmReservationRepository::new(db.clone()),
            payments: SeaOrmPaymentRepository::new(db.clone()),
            refunds: SeaOrmRefundRepository::new(db.clone()),
            damage_reports: SeaOrmDamageRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn vehicles(&self) -> &dyn VehicleRepository {
        &self.vehicles
    }

    fn insurances(&self) -> &dyn InsuranceRepository {
        &self.insurances
    }

    fn reservations(&self) -> &dyn ReservationRepository {
        &self.reservations
    }

    fn payments(&self) -> &dyn PaymentRepository {
        &self.payments
    }

    fn refunds(&self) -> &dyn RefundRepository {
        &self.refunds
    }

    fn damage_reports(&self) -> &dyn DamageRepository {
        &self.damage_reports
    }
}
