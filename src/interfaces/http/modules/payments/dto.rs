//! Payment DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::PaymentReceipt;
use crate::domain::{DomainResult, Payment, PaymentMethod, PaymentStatus, ReservationStatus};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ProcessPaymentRequest {
    /// `credit_card` (default), `debit_card` or `bank_transfer`
    #[serde(default)]
    pub payment_method: Option<String>,
}

impl ProcessPaymentRequest {
    pub fn method(&self) -> DomainResult<PaymentMethod> {
        match self.payment_method.as_deref() {
            None => Ok(PaymentMethod::default()),
            Some(method) => method.parse(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentDto {
    pub id: i32,
    pub reservation_id: i32,
    pub amount: Decimal,
    #[schema(value_type = String, example = "credit_card")]
    pub payment_method: PaymentMethod,
    #[schema(value_type = String, example = "completed")]
    pub status: PaymentStatus,
    pub transaction_id: String,
    pub created_at: DateTime<Utc>,
    pub paid_at: DateTime<Utc>,
}

impl From<Payment> for PaymentDto {
    fn from(p: Payment) -> Self {
        Self {
            id: p.id,
            reservation_id: p.reservation_id,
            amount: p.amount,
            payment_method: p.method,
            status: p.status,
            transaction_id: p.transaction_id,
            created_at: p.created_at,
            paid_at: p.paid_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentReceiptDto {
    pub payment: PaymentDto,
    /// Reservation status after the payment; `pending` advances to `confirmed`
    #[schema(value_type = String, example = "confirmed")]
    pub reservation_status: ReservationStatus,
}

impl From<PaymentReceipt> for PaymentReceiptDto {
    fn from(receipt: PaymentReceipt) -> Self {
        Self {
            payment: receipt.payment.into(),
            reservation_status: receipt.reservation_status,
        }
    }
}
