//! SeaORM implementation of DamageRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::info;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use super::decode;
use super::reservation_repository::load_owned;
use super::vehicle_repository::mark_maintenance;
use crate::domain::damage::model::ensure_reportable;
use crate::domain::damage::{
    DamageReport, DamageReportUpdate, DamageRepository, DamageStatus, NewDamageReport,
};
use crate::domain::money::{from_cents, to_cents};
use crate::domain::reservation::Reservation;
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{damage_report, reservation};

pub struct SeaOrmDamageRepository {
    db: DatabaseConnection,
}

impl SeaOrmDamageRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: damage_report::Model) -> DomainResult<DamageReport> {
    Ok(DamageReport {
        id: m.id,
        reservation_id: m.reservation_id,
        description: m.description,
        repair_cost: from_cents(m.repair_cost),
        status: decode("damage status", &m.status)?,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

/// Last write wins: the reservation carries the latest report's cost
async fn set_damage_charge<C: ConnectionTrait>(
    conn: &C,
    reservation_id: i32,
    cents: i64,
) -> DomainResult<()> {
    reservation::Entity::update_many()
        .col_expr(reservation::Column::DamageCharge, Expr::value(cents))
        .filter(reservation::Column::Id.eq(reservation_id))
        .exec(conn)
        .await?;
    Ok(())
}

#[async_trait]
impl DamageRepository for SeaOrmDamageRepository {
    async fn report(
        &self,
        report: NewDamageReport,
        user_id: i32,
    ) -> DomainResult<(DamageReport, Reservation)> {
        let txn = self.db.begin().await?;

        let booking = load_owned(&txn, report.reservation_id, Some(user_id)).await?;
        ensure_reportable(&booking)?;

        let now = Utc::now();
        let cost = to_cents(report.repair_cost)?;
        let saved = damage_report::ActiveModel {
            id: NotSet,
            reservation_id: Set(booking.id),
            description: Set(report.description),
            repair_cost: Set(cost),
            status: Set(DamageStatus::Reported.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        set_damage_charge(&txn, booking.id, cost).await?;
        mark_maintenance(&txn, booking.vehicle_id).await?;

        let booking = load_owned(&txn, booking.id, None).await?;
        txn.commit().await?;

        info!(
            "Damage report {} on reservation {}; vehicle {} to maintenance",
            saved.id, booking.id, booking.vehicle_id
        );
        Ok((model_to_domain(saved)?, booking))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<DamageReport>> {
        damage_report::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(model_to_domain)
            .transpose()
    }

    async fn find_for_reservation(&self, reservation_id: i32) -> DomainResult<Vec<DamageReport>> {
        damage_report::Entity::find()
            .filter(damage_report::Column::ReservationId.eq(reservation_id))
            .order_by_desc(damage_report::Column::CreatedAt)
            .order_by_desc(damage_report::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(model_to_domain)
            .collect()
    }

    async fn find_all(&self) -> DomainResult<Vec<DamageReport>> {
        damage_report::Entity::find()
            .order_by_desc(damage_report::Column::CreatedAt)
            .order_by_desc(damage_report::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(model_to_domain)
            .collect()
    }

    async fn update(
        &self,
        id: i32,
        update: DamageReportUpdate,
        at: DateTime<Utc>,
    ) -> DomainResult<DamageReport> {
        let txn = self.db.begin().await?;

        let existing = damage_report::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| DomainError::not_found("DamageReport", id))?;
        let reservation_id = existing.reservation_id;

        let new_cost = update.repair_cost.map(to_cents).transpose()?;

        let mut active: damage_report::ActiveModel = existing.into();
        if let Some(status) = update.status {
            active.status = Set(status.as_str().to_string());
        }
        if let Some(cost) = new_cost {
            active.repair_cost = Set(cost);
        }
        if let Some(description) = update.description {
            active.description = Set(description);
        }
        active.updated_at = Set(at);
        let saved = active.update(&txn).await?;

        if let Some(cost) = new_cost {
            let latest = damage_report::Entity::find()
                .filter(damage_report::Column::ReservationId.eq(reservation_id))
                .order_by_desc(damage_report::Column::CreatedAt)
                .order_by_desc(damage_report::Column::Id)
                .one(&txn)
                .await?;
            if latest.map(|m| m.id) == Some(id) {
                set_damage_charge(&txn, reservation_id, cost).await?;
            }
        }

        txn.commit().await?;
        model_to_domain(saved)
    }

    async fn total_repair_costs(&self) -> DomainResult<Decimal> {
        let total: Option<Option<i64>> = damage_report::Entity::find()
            .select_only()
            .column_as(damage_report::Column::RepairCost.sum(), "total")
            .into_tuple()
            .one(&self.db)
            .await?;
        Ok(from_cents(total.flatten().unwrap_or(0)))
    }
}
