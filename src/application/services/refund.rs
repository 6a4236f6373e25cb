//! Refund processing service

use std::sync::Arc;

use tracing::info;

use super::counters;
use crate::domain::{
    AuthContext, DomainResult, Refund, RefundDecision, RepositoryProvider,
};
use crate::shared::{Clock, LockKey, SharedLocks};

pub struct RefundService {
    repos: Arc<dyn RepositoryProvider>,
    locks: SharedLocks,
    clock: Arc<dyn Clock>,
}

impl RefundService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, locks: SharedLocks, clock: Arc<dyn Clock>) -> Self {
        Self { repos, locks, clock }
    }

    /// Request 80% of the total price back on a completed or cancelled
    /// reservation owned by the caller
    pub async fn request(
        &self,
        ctx: &AuthContext,
        reservation_id: i32,
        reason: Option<String>,
    ) -> DomainResult<Refund> {
        let _guard = self
            .locks
            .acquire(LockKey::Reservation(reservation_id))
            .await?;

        let refund = self
            .repos
            .refunds()
            .request(reservation_id, ctx.user_id, reason.unwrap_or_default())
            .await?;

        metrics::counter!(counters::REFUNDS_REQUESTED).increment(1);
        info!(
            refund_id = refund.id,
            reservation_id,
            amount = %refund.amount,
            "Refund requested"
        );
        Ok(refund)
    }

    /// Approve or reject the caller's own pending refund.
    ///
    /// A decided refund is locked: deciding it again fails with `InvalidState`.
    pub async fn decide(
        &self,
        ctx: &AuthContext,
        refund_id: i32,
        decision: RefundDecision,
    ) -> DomainResult<Refund> {
        let refund = self
            .repos
            .refunds()
            .decide(refund_id, ctx.user_id, decision, self.clock.now())
            .await?;

        info!(refund_id, decision = %decision, "Refund decided");
        Ok(refund)
    }

    pub async fn list(&self, ctx: &AuthContext) -> DomainResult<Vec<Refund>> {
        self.repos.refunds().find_for_user(ctx.user_id).await
    }
}
