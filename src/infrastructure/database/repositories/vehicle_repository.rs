//! SeaORM implementation of VehicleRepository

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use log::debug;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::{decode, is_unique_violation};
use crate::domain::money::{from_cents, to_cents};
use crate::domain::reservation::ReservationStatus;
use crate::domain::vehicle::{
    Favorite, NewVehicle, Vehicle, VehicleRepository, VehicleSearch, VehicleStatus, VehicleType,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{favorite, insurance, reservation, vehicle};

pub struct SeaOrmVehicleRepository {
    db: DatabaseConnection,
}

impl SeaOrmVehicleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

pub(crate) fn model_to_domain(m: vehicle::Model) -> DomainResult<Vehicle> {
    Ok(Vehicle {
        id: m.id,
        make: m.make,
        model: m.model,
        year: m.year,
        daily_rate: from_cents(m.daily_rate),
        status: decode("vehicle status", &m.status)?,
        vehicle_type: decode("vehicle type", &m.vehicle_type)?,
        location: decode("location", &m.location)?,
        category: decode("vehicle category", &m.category)?,
        created_at: m.created_at,
    })
}

fn favorite_to_domain(m: favorite::Model) -> Favorite {
    Favorite {
        id: m.id,
        user_id: m.user_id,
        vehicle_id: m.vehicle_id,
        created_at: m.created_at,
    }
}

fn live_statuses() -> [&'static str; 2] {
    [
        ReservationStatus::Pending.as_str(),
        ReservationStatus::Confirmed.as_str(),
    ]
}

/// Recompute the cached vehicle status from its reservations as of `today`.
///
/// Runs on the caller's connection so it commits with the change that
/// triggered it. `maintenance` is never overwritten.
pub(crate) async fn refresh_status<C: ConnectionTrait>(
    conn: &C,
    vehicle_id: i32,
    today: NaiveDate,
) -> DomainResult<VehicleStatus> {
    let covering = reservation::Entity::find()
        .filter(reservation::Column::VehicleId.eq(vehicle_id))
        .filter(reservation::Column::Status.is_in(live_statuses()))
        .filter(reservation::Column::StartDate.lte(today))
        .filter(reservation::Column::EndDate.gte(today))
        .count(conn)
        .await?;

    let target = VehicleStatus::derive(VehicleStatus::Available, covering > 0);

    vehicle::Entity::update_many()
        .col_expr(vehicle::Column::Status, Expr::value(target.as_str()))
        .filter(vehicle::Column::Id.eq(vehicle_id))
        .filter(vehicle::Column::Status.ne(VehicleStatus::Maintenance.as_str()))
        .exec(conn)
        .await?;

    debug!("Vehicle {} derived status: {}", vehicle_id, target);
    Ok(target)
}

/// Take the vehicle out of the bookable pool
pub(crate) async fn mark_maintenance<C: ConnectionTrait>(conn: &C, vehicle_id: i32) -> DomainResult<()> {
    vehicle::Entity::update_many()
        .col_expr(
            vehicle::Column::Status,
            Expr::value(VehicleStatus::Maintenance.as_str()),
        )
        .filter(vehicle::Column::Id.eq(vehicle_id))
        .exec(conn)
        .await?;
    Ok(())
}

// ── VehicleRepository impl ──────────────────────────────────────

#[async_trait]
impl VehicleRepository for SeaOrmVehicleRepository {
    async fn save(&self, v: NewVehicle) -> DomainResult<Vehicle> {
        debug!("Saving vehicle: {} {} ({})", v.make, v.model, v.year);

        let model = vehicle::ActiveModel {
            id: NotSet,
            make: Set(v.make),
            model: Set(v.model),
            year: Set(v.year),
            daily_rate: Set(to_cents(v.daily_rate)?),
            status: Set(VehicleStatus::Available.as_str().to_string()),
            vehicle_type: Set(v.vehicle_type.as_str().to_string()),
            location: Set(v.location.as_str().to_string()),
            category: Set(v.vehicle_type.category().as_str().to_string()),
            created_at: Set(Utc::now()),
        };
        model_to_domain(model.insert(&self.db).await?)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Vehicle>> {
        vehicle::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(model_to_domain)
            .transpose()
    }

    async fn find_available(&self) -> DomainResult<Vec<Vehicle>> {
        self.search(&VehicleSearch::default()).await
    }

    async fn search(&self, filter: &VehicleSearch) -> DomainResult<Vec<Vehicle>> {
        let mut query = vehicle::Entity::find()
            .filter(vehicle::Column::Status.eq(VehicleStatus::Available.as_str()));

        // SQLite LIKE is case-insensitive for ASCII
        if let Some(make) = filter.make.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
            query = query.filter(vehicle::Column::Make.contains(make));
        }
        if let Some(min) = filter.min_price {
            query = query.filter(vehicle::Column::DailyRate.gte(to_cents(min)?));
        }
        if let Some(max) = filter.max_price {
            query = query.filter(vehicle::Column::DailyRate.lte(to_cents(max)?));
        }
        if let Some(vehicle_type) = filter.vehicle_type {
            query = query.filter(vehicle::Column::VehicleType.eq(vehicle_type.as_str()));
        }
        if let Some(location) = filter.location {
            query = query.filter(vehicle::Column::Location.eq(location.as_str()));
        }

        query
            .order_by_asc(vehicle::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(model_to_domain)
            .collect()
    }

    async fn find_by_types(&self, types: &[VehicleType]) -> DomainResult<Vec<Vehicle>> {
        vehicle::Entity::find()
            .filter(vehicle::Column::VehicleType.is_in(types.iter().map(|t| t.as_str())))
            .order_by_asc(vehicle::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(model_to_domain)
            .collect()
    }

    async fn clear_maintenance(&self, id: i32, today: NaiveDate) -> DomainResult<Vehicle> {
        let txn = self.db.begin().await?;

        let cleared = vehicle::Entity::update_many()
            .col_expr(
                vehicle::Column::Status,
                Expr::value(VehicleStatus::Available.as_str()),
            )
            .filter(vehicle::Column::Id.eq(id))
            .filter(vehicle::Column::Status.eq(VehicleStatus::Maintenance.as_str()))
            .exec(&txn)
            .await?;

        if cleared.rows_affected == 0 {
            let exists = vehicle::Entity::find_by_id(id).one(&txn).await?.is_some();
            return Err(if exists {
                DomainError::InvalidState(format!("Vehicle {} is not under maintenance", id))
            } else {
                DomainError::not_found("Vehicle", id)
            });
        }

        refresh_status(&txn, id, today).await?;

        let model = vehicle::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| DomainError::not_found("Vehicle", id))?;

        txn.commit().await?;
        model_to_domain(model)
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let txn = self.db.begin().await?;

        if vehicle::Entity::find_by_id(id).one(&txn).await?.is_none() {
            return Err(DomainError::not_found("Vehicle", id));
        }

        let history = reservation::Entity::find()
            .filter(reservation::Column::VehicleId.eq(id))
            .count(&txn)
            .await?;
        if history > 0 {
            return Err(DomainError::Conflict(format!(
                "Vehicle {} has {} reservation(s) and cannot be deleted",
                id, history
            )));
        }

        favorite::Entity::delete_many()
            .filter(favorite::Column::VehicleId.eq(id))
            .exec(&txn)
            .await?;
        insurance::Entity::delete_many()
            .filter(insurance::Column::VehicleId.eq(id))
            .exec(&txn)
            .await?;
        vehicle::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        debug!("Vehicle {} deleted", id);
        Ok(())
    }

    async fn add_favorite(&self, user_id: i32, vehicle_id: i32) -> DomainResult<Favorite> {
        if vehicle::Entity::find_by_id(vehicle_id)
            .one(&self.db)
            .await?
            .is_none()
        {
            return Err(DomainError::not_found("Vehicle", vehicle_id));
        }

        let model = favorite::ActiveModel {
            id: NotSet,
            user_id: Set(user_id),
            vehicle_id: Set(vehicle_id),
            created_at: Set(Utc::now()),
        };

        let saved = model.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::Conflict(format!("Vehicle {} is already a favorite", vehicle_id))
            } else {
                e.into()
            }
        })?;

        Ok(favorite_to_domain(saved))
    }

    async fn find_favorites(&self, user_id: i32) -> DomainResult<Vec<Favorite>> {
        let models = favorite::Entity::find()
            .filter(favorite::Column::UserId.eq(user_id))
            .order_by_desc(favorite::Column::CreatedAt)
            .order_by_desc(favorite::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(favorite_to_domain).collect())
    }
}
