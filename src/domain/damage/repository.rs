//! Damage report repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::model::{DamageReport, DamageReportUpdate, NewDamageReport};
use crate::domain::reservation::Reservation;
use crate::domain::DomainResult;

#[async_trait]
pub trait DamageRepository: Send + Sync {
    /// Insert a `reported` damage report in one transaction with its effects:
    /// the reservation's `damage_charge` becomes the repair cost and the
    /// vehicle goes to `maintenance`.
    ///
    /// `NotFound` unless the reservation exists and belongs to `user_id`;
    /// `InvalidState` when it is cancelled.
    async fn report(
        &self,
        report: NewDamageReport,
        user_id: i32,
    ) -> DomainResult<(DamageReport, Reservation)>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<DamageReport>>;

    async fn find_for_reservation(&self, reservation_id: i32) -> DomainResult<Vec<DamageReport>>;

    /// All reports, newest first
    async fn find_all(&self) -> DomainResult<Vec<DamageReport>>;

    /// Apply an administrative edit. A new repair cost on the reservation's
    /// latest report is propagated to its `damage_charge`.
    async fn update(
        &self,
        id: i32,
        update: DamageReportUpdate,
        at: DateTime<Utc>,
    ) -> DomainResult<DamageReport>;

    async fn total_repair_costs(&self) -> DomainResult<Decimal>;
}
