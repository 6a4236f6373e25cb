//! Payment processing service

use std::sync::Arc;

use tracing::info;

use super::counters;
use crate::domain::{
    AuthContext, DomainResult, Payment, PaymentMethod, RepositoryProvider, ReservationStatus,
};
use crate::shared::{LockKey, SharedLocks};

/// Outcome of a successful payment
#[derive(Debug, Clone)]
pub struct PaymentReceipt {
    pub payment: Payment,
    pub reservation_status: ReservationStatus,
}

pub struct PaymentService {
    repos: Arc<dyn RepositoryProvider>,
    locks: SharedLocks,
}

impl PaymentService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, locks: SharedLocks) -> Self {
        Self { repos, locks }
    }

    /// Pay for the caller's reservation.
    ///
    /// The only path from `pending` to `confirmed`. A second payment on an
    /// already paid reservation fails with `InvalidState` and charges nothing.
    pub async fn process(
        &self,
        ctx: &AuthContext,
        reservation_id: i32,
        method: PaymentMethod,
    ) -> DomainResult<PaymentReceipt> {
        let _guard = self
            .locks
            .acquire(LockKey::Reservation(reservation_id))
            .await?;

        let (payment, reservation) = self
            .repos
            .payments()
            .record_completed(reservation_id, ctx.user_id, method)
            .await?;

        metrics::counter!(counters::PAYMENTS_COMPLETED).increment(1);
        info!(
            payment_id = payment.id,
            reservation_id,
            amount = %payment.amount,
            method = %payment.method,
            reservation_status = %reservation.status,
            "Payment completed"
        );

        Ok(PaymentReceipt {
            payment,
            reservation_status: reservation.status,
        })
    }

    pub async fn history(&self, ctx: &AuthContext) -> DomainResult<Vec<Payment>> {
        self.repos.payments().history_for_user(ctx.user_id).await
    }
}
