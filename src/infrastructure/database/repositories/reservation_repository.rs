//! SeaORM implementation of ReservationRepository

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use log::{debug, info};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use super::decode;
use super::vehicle_repository::{self, refresh_status};
use crate::domain::money::{from_cents, to_cents};
use crate::domain::reservation::{
    Availability, DateRange, NewReservation, Reservation, ReservationRepository, ReservationStatus,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{damage_report, payment, refund, reservation, vehicle};
use crate::shared::{PaginatedResult, PaginationParams};

pub struct SeaOrmReservationRepository {
    db: DatabaseConnection,
}

impl SeaOrmReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

pub(crate) fn model_to_domain(m: reservation::Model) -> DomainResult<Reservation> {
    Ok(Reservation {
        id: m.id,
        user_id: m.user_id,
        vehicle_id: m.vehicle_id,
        start_date: m.start_date,
        end_date: m.end_date,
        rental_tier: decode("rental tier", &m.rental_tier)?,
        total_price: from_cents(m.total_price),
        status: decode("reservation status", &m.status)?,
        damage_charge: from_cents(m.damage_charge),
        created_at: m.created_at,
    })
}

fn models_to_domain(models: Vec<reservation::Model>) -> DomainResult<Vec<Reservation>> {
    models.into_iter().map(model_to_domain).collect()
}

/// Non-cancelled reservations of the vehicle overlapping `period`
/// (`end >= period.start AND start <= period.end`).
async fn overlapping<C: ConnectionTrait>(
    conn: &C,
    vehicle_id: i32,
    period: &DateRange,
) -> DomainResult<Vec<Reservation>> {
    let models = reservation::Entity::find()
        .filter(reservation::Column::VehicleId.eq(vehicle_id))
        .filter(reservation::Column::Status.ne(ReservationStatus::Cancelled.as_str()))
        .filter(reservation::Column::EndDate.gte(period.start()))
        .filter(reservation::Column::StartDate.lte(period.end()))
        .order_by_asc(reservation::Column::StartDate)
        .all(conn)
        .await?;
    models_to_domain(models)
}

/// Load a reservation inside the caller's transaction, optionally scoped to
/// its owner. A reservation owned by someone else is reported as absent.
pub(crate) async fn load_owned<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    owner_id: Option<i32>,
) -> DomainResult<Reservation> {
    let mut query = reservation::Entity::find_by_id(id);
    if let Some(owner_id) = owner_id {
        query = query.filter(reservation::Column::UserId.eq(owner_id));
    }
    let model = query
        .one(conn)
        .await?
        .ok_or_else(|| DomainError::not_found("Reservation", id))?;
    model_to_domain(model)
}

// ── ReservationRepository impl ──────────────────────────────────

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>> {
        reservation::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(model_to_domain)
            .transpose()
    }

    async fn find_for_user(&self, user_id: i32) -> DomainResult<Vec<Reservation>> {
        let models = reservation::Entity::find()
            .filter(reservation::Column::UserId.eq(user_id))
            .order_by_desc(reservation::Column::StartDate)
            .order_by_desc(reservation::Column::Id)
            .all(&self.db)
            .await?;
        models_to_domain(models)
    }

    async fn find_all(&self, page: PaginationParams) -> DomainResult<PaginatedResult<Reservation>> {
        let query = reservation::Entity::find()
            .order_by_desc(reservation::Column::CreatedAt)
            .order_by_desc(reservation::Column::Id);

        let total = query.clone().count(&self.db).await?;

        let models = query
            .offset(page.offset())
            .limit(page.limit as u64)
            .all(&self.db)
            .await?;

        Ok(PaginatedResult::new(
            models_to_domain(models)?,
            total,
            page.page,
            page.limit,
        ))
    }

    async fn find_conflicts(
        &self,
        vehicle_id: i32,
        period: &DateRange,
    ) -> DomainResult<Vec<Reservation>> {
        overlapping(&self.db, vehicle_id, period).await
    }

    async fn create_if_available(
        &self,
        r: NewReservation,
        today: NaiveDate,
    ) -> DomainResult<Reservation> {
        let txn = self.db.begin().await?;

        let vehicle = vehicle::Entity::find_by_id(r.vehicle_id)
            .one(&txn)
            .await?
            .ok_or_else(|| DomainError::not_found("Vehicle", r.vehicle_id))
            .and_then(vehicle_repository::model_to_domain)?;

        let candidates = overlapping(&txn, r.vehicle_id, &r.period).await?;
        Availability::evaluate(vehicle.id, vehicle.status, &r.period, candidates).into_result()?;

        let model = reservation::ActiveModel {
            id: NotSet,
            user_id: Set(r.user_id),
            vehicle_id: Set(r.vehicle_id),
            start_date: Set(r.period.start()),
            end_date: Set(r.period.end()),
            rental_tier: Set(r.rental_tier.as_str().to_string()),
            total_price: Set(to_cents(r.total_price)?),
            status: Set(ReservationStatus::Pending.as_str().to_string()),
            damage_charge: Set(0),
            created_at: Set(Utc::now()),
        };
        let saved = model.insert(&txn).await?;

        refresh_status(&txn, r.vehicle_id, today).await?;
        txn.commit().await?;

        debug!(
            "Reservation {} inserted for vehicle {} ({} .. {})",
            saved.id, saved.vehicle_id, saved.start_date, saved.end_date
        );
        model_to_domain(saved)
    }

    async fn transition(
        &self,
        id: i32,
        target: ReservationStatus,
        today: NaiveDate,
    ) -> DomainResult<Reservation> {
        let txn = self.db.begin().await?;

        let current = load_owned(&txn, id, None).await?;
        current.ensure_transition(target)?;

        let sources: Vec<&str> = ReservationStatus::sources_of(target)
            .iter()
            .map(|s| s.as_str())
            .collect();

        let result = reservation::Entity::update_many()
            .col_expr(reservation::Column::Status, Expr::value(target.as_str()))
            .filter(reservation::Column::Id.eq(id))
            .filter(reservation::Column::Status.is_in(sources))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(DomainError::InvalidState(format!(
                "Reservation {} changed concurrently; cannot move to {}",
                id, target
            )));
        }

        refresh_status(&txn, current.vehicle_id, today).await?;
        let updated = load_owned(&txn, id, None).await?;
        txn.commit().await?;

        info!("Reservation {}: {} -> {}", id, current.status, target);
        Ok(updated)
    }

    async fn delete_cascade(&self, id: i32, today: NaiveDate) -> DomainResult<()> {
        let txn = self.db.begin().await?;

        let existing = load_owned(&txn, id, None).await?;

        payment::Entity::delete_many()
            .filter(payment::Column::ReservationId.eq(id))
            .exec(&txn)
            .await?;
        damage_report::Entity::delete_many()
            .filter(damage_report::Column::ReservationId.eq(id))
            .exec(&txn)
            .await?;
        refund::Entity::update_many()
            .col_expr(refund::Column::ReservationId, Expr::value(Option::<i32>::None))
            .filter(refund::Column::ReservationId.eq(id))
            .exec(&txn)
            .await?;
        reservation::Entity::delete_by_id(id).exec(&txn).await?;

        refresh_status(&txn, existing.vehicle_id, today).await?;
        txn.commit().await?;

        info!("Reservation {} deleted", id);
        Ok(())
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(reservation::Entity::find().count(&self.db).await?)
    }

    async fn busiest_vehicles(&self, limit: u64) -> DomainResult<Vec<(i32, u64)>> {
        let rows: Vec<(i32, i64)> = reservation::Entity::find()
            .select_only()
            .column(reservation::Column::VehicleId)
            .column_as(reservation::Column::Id.count(), "bookings")
            .group_by(reservation::Column::VehicleId)
            .order_by_desc(Expr::col(reservation::Column::Id).count())
            .order_by_asc(reservation::Column::VehicleId)
            .limit(limit)
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(vehicle_id, bookings)| (vehicle_id, bookings.max(0) as u64))
            .collect())
    }
}
