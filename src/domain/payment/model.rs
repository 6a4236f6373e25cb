//! Payment domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::reservation::{Reservation, ReservationStatus};
use crate::shared::{DomainError, DomainResult};

string_enum! {
    pub enum PaymentMethod ("payment method") {
        CreditCard => "credit_card",
        DebitCard => "debit_card",
        BankTransfer => "bank_transfer",
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        Self::CreditCard
    }
}

string_enum! {
    pub enum PaymentStatus ("payment status") {
        Pending => "pending",
        Completed => "completed",
        Failed => "failed",
        /// Completed, then reversed by an approved refund
        Refunded => "refunded",
    }
}

/// Monetary transaction against a reservation (at most one per reservation)
#[derive(Debug, Clone)]
pub struct Payment {
    pub id: i32,
    pub reservation_id: i32,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub transaction_id: String,
    pub created_at: DateTime<Utc>,
    pub paid_at: DateTime<Utc>,
}

impl Payment {
    /// Fresh transaction identifier, unique across payments
    pub fn generate_transaction_id(user_id: i32) -> String {
        format!("txn_{}_{}", user_id, uuid::Uuid::new_v4().simple())
    }

    pub fn is_completed(&self) -> bool {
        self.status == PaymentStatus::Completed
    }
}

/// Payment state attached to reservation listings
#[derive(Debug, Clone, Serialize)]
pub struct PaymentSummary {
    pub payment_id: i32,
    pub status: PaymentStatus,
    pub amount: Decimal,
    pub method: PaymentMethod,
}

impl From<&Payment> for PaymentSummary {
    fn from(p: &Payment) -> Self {
        Self {
            payment_id: p.id,
            status: p.status,
            amount: p.amount,
            method: p.method,
        }
    }
}

/// Guard for a new completed payment: the reservation must not be cancelled
/// and must not already carry a completed payment.
pub fn ensure_payable(reservation: &Reservation, existing: Option<&Payment>) -> DomainResult<()> {
    if reservation.status == ReservationStatus::Cancelled {
        return Err(DomainError::InvalidState(format!(
            "Cannot process payment for cancelled reservation {}",
            reservation.id
        )));
    }
    if let Some(payment) = existing.filter(|p| p.is_completed()) {
        return Err(DomainError::InvalidState(format!(
            "Reservation {} has already been paid (payment {})",
            reservation.id, payment.id
        )));
    }
    Ok(())
}

/// Status a reservation takes after a successful payment.
///
/// Only `pending` advances; other states are never moved backwards.
pub fn status_after_payment(current: ReservationStatus) -> ReservationStatus {
    match current {
        ReservationStatus::Pending => ReservationStatus::Confirmed,
        other => other,
    }
}
