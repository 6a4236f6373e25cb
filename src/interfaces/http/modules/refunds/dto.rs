//! Refund DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{Refund, RefundStatus};

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct RequestRefundRequest {
    #[validate(length(max = 1000))]
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DecideRefundRequest {
    /// `approved` or `rejected`
    #[validate(length(min = 1, message = "decision is required"))]
    pub decision: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RefundDto {
    pub id: i32,
    pub reservation_id: Option<i32>,
    /// 80% of the reservation total
    pub amount: Decimal,
    #[schema(value_type = String, example = "pending")]
    pub status: RefundStatus,
    pub reason: String,
    pub created_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
}

impl From<Refund> for RefundDto {
    fn from(r: Refund) -> Self {
        Self {
            id: r.id,
            reservation_id: r.reservation_id,
            amount: r.amount,
            status: r.status,
            reason: r.reason,
            created_at: r.created_at,
            processed_at: r.processed_at,
        }
    }
}
