//! SeaORM implementation of PaymentRepository

use async_trait::async_trait;
use chrono::Utc;
use log::info;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use super::reservation_repository::load_owned;
use super::{decode, is_unique_violation};
use crate::domain::money::{from_cents, to_cents};
use crate::domain::payment::model::{ensure_payable, status_after_payment};
use crate::domain::payment::{Payment, PaymentMethod, PaymentRepository, PaymentStatus};
use crate::domain::reservation::{Reservation, ReservationStatus};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{payment, reservation};

pub struct SeaOrmPaymentRepository {
    db: DatabaseConnection,
}

impl SeaOrmPaymentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: payment::Model) -> DomainResult<Payment> {
    Ok(Payment {
        id: m.id,
        reservation_id: m.reservation_id,
        amount: from_cents(m.amount),
        method: decode("payment method", &m.method)?,
        status: decode("payment status", &m.status)?,
        transaction_id: m.transaction_id,
        created_at: m.created_at,
        paid_at: m.paid_at,
    })
}

fn already_paid(reservation_id: i32) -> DomainError {
    DomainError::InvalidState(format!(
        "Reservation {} has already been paid",
        reservation_id
    ))
}

// ── PaymentRepository impl ──────────────────────────────────────

#[async_trait]
impl PaymentRepository for SeaOrmPaymentRepository {
    async fn find_for_reservation(&self, reservation_id: i32) -> DomainResult<Option<Payment>> {
        payment::Entity::find()
            .filter(payment::Column::ReservationId.eq(reservation_id))
            .one(&self.db)
            .await?
            .map(model_to_domain)
            .transpose()
    }

    async fn history_for_user(&self, user_id: i32) -> DomainResult<Vec<Payment>> {
        payment::Entity::find()
            .inner_join(reservation::Entity)
            .filter(reservation::Column::UserId.eq(user_id))
            .order_by_desc(payment::Column::PaidAt)
            .order_by_desc(payment::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(model_to_domain)
            .collect()
    }

    async fn record_completed(
        &self,
        reservation_id: i32,
        user_id: i32,
        method: PaymentMethod,
    ) -> DomainResult<(Payment, Reservation)> {
        let txn = self.db.begin().await?;

        let booking = load_owned(&txn, reservation_id, Some(user_id)).await?;
        let previous = payment::Entity::find()
            .filter(payment::Column::ReservationId.eq(reservation_id))
            .one(&txn)
            .await?;
        let previous_domain = previous.clone().map(model_to_domain).transpose()?;
        ensure_payable(&booking, previous_domain.as_ref())?;

        let now = Utc::now();
        let amount = to_cents(booking.total_price)?;
        let transaction_id = Payment::generate_transaction_id(user_id);

        let saved = match previous {
            // Supersede a failed or refunded attempt in place; the row is
            // unique per reservation.
            Some(prev) => {
                let mut active: payment::ActiveModel = prev.into();
                active.amount = Set(amount);
                active.method = Set(method.as_str().to_string());
                active.status = Set(PaymentStatus::Completed.as_str().to_string());
                active.transaction_id = Set(transaction_id);
                active.paid_at = Set(now);
                active.update(&txn).await?
            }
            None => payment::ActiveModel {
                id: NotSet,
                reservation_id: Set(reservation_id),
                amount: Set(amount),
                method: Set(method.as_str().to_string()),
                status: Set(PaymentStatus::Completed.as_str().to_string()),
                transaction_id: Set(transaction_id),
                created_at: Set(now),
                paid_at: Set(now),
            }
            .insert(&txn)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    already_paid(reservation_id)
                } else {
                    e.into()
                }
            })?,
        };

        let next = status_after_payment(booking.status);
        if next != booking.status {
            let advanced = reservation::Entity::update_many()
                .col_expr(reservation::Column::Status, Expr::value(next.as_str()))
                .filter(reservation::Column::Id.eq(reservation_id))
                .filter(reservation::Column::Status.eq(ReservationStatus::Pending.as_str()))
                .exec(&txn)
                .await?;
            if advanced.rows_affected == 0 {
                return Err(DomainError::InvalidState(format!(
                    "Reservation {} is no longer pending",
                    reservation_id
                )));
            }
        }

        let booking = load_owned(&txn, reservation_id, None).await?;
        txn.commit().await?;

        info!(
            "Payment {} completed for reservation {} ({})",
            saved.id, reservation_id, booking.status
        );
        Ok((model_to_domain(saved)?, booking))
    }

    async fn completed_revenue(&self) -> DomainResult<Decimal> {
        let total: Option<Option<i64>> = payment::Entity::find()
            .select_only()
            .column_as(payment::Column::Amount.sum(), "revenue")
            .filter(payment::Column::Status.eq(PaymentStatus::Completed.as_str()))
            .into_tuple()
            .one(&self.db)
            .await?;
        Ok(from_cents(total.flatten().unwrap_or(0)))
    }
}
