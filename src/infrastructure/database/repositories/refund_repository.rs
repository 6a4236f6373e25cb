//! SeaORM implementation of RefundRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::info;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::decode;
use super::reservation_repository::load_owned;
use crate::domain::money::{from_cents, to_cents};
use crate::domain::payment::PaymentStatus;
use crate::domain::refund::model::{ensure_refundable, refund_amount};
use crate::domain::refund::{Refund, RefundDecision, RefundRepository, RefundStatus};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{payment, refund};

pub struct SeaOrmRefundRepository {
    db: DatabaseConnection,
}

impl SeaOrmRefundRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: refund::Model) -> DomainResult<Refund> {
    Ok(Refund {
        id: m.id,
        reservation_id: m.reservation_id,
        requested_by: m.requested_by,
        amount: from_cents(m.amount),
        status: decode("refund status", &m.status)?,
        reason: m.reason,
        created_at: m.created_at,
        processed_at: m.processed_at,
    })
}

/// Move the reservation's money back for an approved refund.
///
/// A paid reservation is refunded by flipping its completed payment; when
/// nothing is left to flip the approval fails. An unpaid reservation accepts
/// at most one approved refund. Errors roll back the caller's transaction.
async fn settle_approval<C: ConnectionTrait>(
    conn: &C,
    refund_id: i32,
    reservation_id: i32,
) -> DomainResult<()> {
    let payments = payment::Entity::find()
        .filter(payment::Column::ReservationId.eq(reservation_id))
        .count(conn)
        .await?;

    if payments == 0 {
        let approved = refund::Entity::find()
            .filter(refund::Column::ReservationId.eq(reservation_id))
            .filter(refund::Column::Id.ne(refund_id))
            .filter(refund::Column::Status.eq(RefundStatus::Approved.as_str()))
            .count(conn)
            .await?;
        if approved > 0 {
            return Err(DomainError::InvalidState(format!(
                "Reservation {} already has an approved refund",
                reservation_id
            )));
        }
        return Ok(());
    }

    let refunded = payment::Entity::update_many()
        .col_expr(
            payment::Column::Status,
            Expr::value(PaymentStatus::Refunded.as_str()),
        )
        .filter(payment::Column::ReservationId.eq(reservation_id))
        .filter(payment::Column::Status.eq(PaymentStatus::Completed.as_str()))
        .exec(conn)
        .await?;
    if refunded.rows_affected == 0 {
        return Err(DomainError::InvalidState(format!(
            "Reservation {} has no completed payment left to refund",
            reservation_id
        )));
    }
    Ok(())
}

#[async_trait]
impl RefundRepository for SeaOrmRefundRepository {
    async fn request(
        &self,
        reservation_id: i32,
        user_id: i32,
        reason: String,
    ) -> DomainResult<Refund> {
        let txn = self.db.begin().await?;

        let booking = load_owned(&txn, reservation_id, Some(user_id)).await?;
        ensure_refundable(&booking)?;

        let model = refund::ActiveModel {
            id: NotSet,
            reservation_id: Set(Some(reservation_id)),
            requested_by: Set(user_id),
            amount: Set(to_cents(refund_amount(booking.total_price))?),
            status: Set(RefundStatus::Pending.as_str().to_string()),
            reason: Set(reason),
            created_at: Set(Utc::now()),
            processed_at: Set(None),
        };
        let saved = model.insert(&txn).await?;
        txn.commit().await?;

        model_to_domain(saved)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Refund>> {
        refund::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(model_to_domain)
            .transpose()
    }

    async fn find_for_user(&self, user_id: i32) -> DomainResult<Vec<Refund>> {
        refund::Entity::find()
            .filter(refund::Column::RequestedBy.eq(user_id))
            .order_by_desc(refund::Column::CreatedAt)
            .order_by_desc(refund::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(model_to_domain)
            .collect()
    }

    async fn decide(
        &self,
        id: i32,
        user_id: i32,
        decision: RefundDecision,
        at: DateTime<Utc>,
    ) -> DomainResult<Refund> {
        let txn = self.db.begin().await?;

        let current = refund::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| DomainError::not_found("Refund", id))
            .and_then(model_to_domain)?;
        current.ensure_decidable_by(user_id)?;

        let status = RefundStatus::from(decision);
        let decided = refund::Entity::update_many()
            .col_expr(refund::Column::Status, Expr::value(status.as_str()))
            .col_expr(refund::Column::ProcessedAt, Expr::value(at))
            .filter(refund::Column::Id.eq(id))
            .filter(refund::Column::Status.eq(RefundStatus::Pending.as_str()))
            .exec(&txn)
            .await?;
        if decided.rows_affected == 0 {
            return Err(DomainError::InvalidState(format!(
                "Refund {} was decided concurrently",
                id
            )));
        }

        if let (RefundDecision::Approved, Some(reservation_id)) = (decision, current.reservation_id) {
            settle_approval(&txn, id, reservation_id).await?;
        }

        let updated = refund::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| DomainError::not_found("Refund", id))
            .and_then(model_to_domain)?;
        txn.commit().await?;

        info!("Refund {} {}", id, status);
        Ok(updated)
    }
}
