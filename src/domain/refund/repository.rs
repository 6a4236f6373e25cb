//! Refund repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::{Refund, RefundDecision};
use crate::domain::DomainResult;

#[async_trait]
pub trait RefundRepository: Send + Sync {
    /// Create a `pending` refund for a completed or cancelled reservation
    /// owned by `user_id`, checked and inserted in one transaction
    async fn request(&self, reservation_id: i32, user_id: i32, reason: String)
        -> DomainResult<Refund>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Refund>>;

    async fn find_for_user(&self, user_id: i32) -> DomainResult<Vec<Refund>>;

    /// Apply a terminal decision if the refund is still `pending`.
    ///
    /// Approval also marks the reservation's completed payment `refunded`.
    async fn decide(
        &self,
        id: i32,
        user_id: i32,
        decision: RefundDecision,
        at: DateTime<Utc>,
    ) -> DomainResult<Refund>;
}
