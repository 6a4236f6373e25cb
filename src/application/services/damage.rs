//! Damage reporting service

use std::sync::Arc;

use tracing::info;

use super::counters;
use crate::domain::{
    AuthContext, DamageReport, DamageReportUpdate, DomainError, DomainResult, NewDamageReport,
    RepositoryProvider,
};
use crate::shared::{Clock, LockKey, SharedLocks};

pub struct DamageService {
    repos: Arc<dyn RepositoryProvider>,
    locks: SharedLocks,
    clock: Arc<dyn Clock>,
}

impl DamageService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, locks: SharedLocks, clock: Arc<dyn Clock>) -> Self {
        Self { repos, locks, clock }
    }

    /// File a damage report on the caller's reservation.
    ///
    /// Sets the reservation's damage charge and sends the vehicle to
    /// maintenance in the same transaction as the insert.
    pub async fn report(
        &self,
        ctx: &AuthContext,
        report: NewDamageReport,
    ) -> DomainResult<DamageReport> {
        report.validate()?;
        let _guard = self
            .locks
            .acquire(LockKey::Reservation(report.reservation_id))
            .await?;

        let (saved, reservation) = self
            .repos
            .damage_reports()
            .report(report, ctx.user_id)
            .await?;

        metrics::counter!(counters::DAMAGE_REPORTS).increment(1);
        info!(
            damage_id = saved.id,
            reservation_id = reservation.id,
            vehicle_id = reservation.vehicle_id,
            repair_cost = %saved.repair_cost,
            "Damage reported, vehicle sent to maintenance"
        );
        Ok(saved)
    }

    pub async fn list(&self, ctx: &AuthContext) -> DomainResult<Vec<DamageReport>> {
        ctx.require_admin()?;
        self.repos.damage_reports().find_all().await
    }

    /// Administrative edit of status, repair cost or description
    pub async fn update(
        &self,
        ctx: &AuthContext,
        id: i32,
        update: DamageReportUpdate,
    ) -> DomainResult<DamageReport> {
        ctx.require_admin()?;
        update.validate()?;

        let existing = self
            .repos
            .damage_reports()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("DamageReport", id))?;
        if update.is_empty() {
            return Ok(existing);
        }

        let _guard = self
            .locks
            .acquire(LockKey::Reservation(existing.reservation_id))
            .await?;

        let updated = self
            .repos
            .damage_reports()
            .update(id, update, self.clock.now())
            .await?;
        info!(damage_id = id, status = %updated.status, repair_cost = %updated.repair_cost, "Damage report updated");
        Ok(updated)
    }
}
