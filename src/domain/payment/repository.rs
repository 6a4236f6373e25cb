//! Payment repository interface

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::model::{Payment, PaymentMethod};
use crate::domain::reservation::Reservation;
use crate::domain::DomainResult;

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn find_for_reservation(&self, reservation_id: i32) -> DomainResult<Option<Payment>>;

    /// Payments on the user's reservations, newest first
    async fn history_for_user(&self, user_id: i32) -> DomainResult<Vec<Payment>>;

    /// Record a completed payment and advance the reservation, atomically.
    ///
    /// Re-reads the reservation and its payment inside the transaction;
    /// `NotFound` unless the reservation exists and belongs to `user_id`,
    /// `InvalidState` when it is cancelled or already paid. A previous
    /// non-completed payment is superseded. Returns the payment and the
    /// reservation as left by the transaction.
    async fn record_completed(
        &self,
        reservation_id: i32,
        user_id: i32,
        method: PaymentMethod,
    ) -> DomainResult<(Payment, Reservation)>;

    /// Sum of completed payments
    async fn completed_revenue(&self) -> DomainResult<Decimal>;
}
