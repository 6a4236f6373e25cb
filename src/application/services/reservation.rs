//! Reservation lifecycle service
//!
//! Orchestrates booking, status transitions and the reservation queries.
//! Every mutation takes one keyed lock and then delegates to a single atomic
//! repository call:
//!
//! | operation        | lock key            |
//! |------------------|---------------------|
//! | create           | `Vehicle(id)`       |
//! | cancel / update  | `Reservation(id)`   |
//! | delete           | `Reservation(id)`   |

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use super::counters;
use crate::domain::reservation::pricing;
use crate::domain::{
    AuthContext, DomainError, DomainResult, NewReservation, PaymentStatus, PaymentSummary,
    RentalTier, RepositoryProvider, Reservation, ReservationStatus,
};
use crate::domain::reservation::{Availability, DateRange};
use crate::shared::{Clock, LockKey, PaginatedResult, PaginationParams, SharedLocks};

/// Booking request
#[derive(Debug, Clone)]
pub struct CreateReservation {
    pub vehicle_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub rental_tier: RentalTier,
}

/// A client's reservation with its payment state
#[derive(Debug, Clone)]
pub struct ReservationView {
    pub reservation: Reservation,
    pub payment: Option<PaymentSummary>,
}

/// Administrative listing row
#[derive(Debug, Clone)]
pub struct ReservationOverview {
    pub reservation: Reservation,
    pub payment_status: Option<PaymentStatus>,
    pub has_damage: bool,
}

pub struct ReservationService {
    repos: Arc<dyn RepositoryProvider>,
    locks: SharedLocks,
    clock: Arc<dyn Clock>,
}

impl ReservationService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, locks: SharedLocks, clock: Arc<dyn Clock>) -> Self {
        Self { repos, locks, clock }
    }

    // ── Booking ─────────────────────────────────────────────────

    /// Book a vehicle for `[start_date, end_date]`.
    ///
    /// The availability check and the insert run as one unit under the
    /// vehicle's lock, so overlapping concurrent requests cannot both win.
    pub async fn create(&self, ctx: &AuthContext, request: CreateReservation) -> DomainResult<Reservation> {
        let today = self.clock.today();
        let period = DateRange::new(request.start_date, request.end_date)?;
        if period.start() < today {
            return Err(DomainError::Validation(format!(
                "Start date {} is in the past",
                period.start()
            )));
        }

        let vehicle = self
            .repos
            .vehicles()
            .find_by_id(request.vehicle_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Vehicle", request.vehicle_id))?;
        let total_price = pricing::price(vehicle.daily_rate, &period, request.rental_tier)?;

        let _guard = self.locks.acquire(LockKey::Vehicle(vehicle.id)).await?;

        let created = self
            .repos
            .reservations()
            .create_if_available(
                NewReservation {
                    user_id: ctx.user_id,
                    vehicle_id: vehicle.id,
                    period,
                    rental_tier: request.rental_tier,
                    total_price,
                },
                today,
            )
            .await;

        match created {
            Ok(reservation) => {
                metrics::counter!(counters::RESERVATIONS_CREATED).increment(1);
                info!(
                    reservation_id = reservation.id,
                    vehicle_id = reservation.vehicle_id,
                    user_id = reservation.user_id,
                    tier = %reservation.rental_tier,
                    total_price = %reservation.total_price,
                    "Reservation created"
                );
                Ok(reservation)
            }
            Err(e @ DomainError::BookingConflict { .. }) => {
                metrics::counter!(counters::BOOKING_CONFLICTS).increment(1);
                info!(vehicle_id = vehicle.id, error = %e, "Booking rejected");
                Err(e)
            }
            Err(e) => {
                if e.is_transient() {
                    warn!(vehicle_id = vehicle.id, error = %e, "Booking contended");
                }
                Err(e)
            }
        }
    }

    /// Read-only availability check; the answer may be stale by the time a
    /// booking is attempted.
    pub async fn check_availability(
        &self,
        vehicle_id: i32,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> DomainResult<Availability> {
        let period = DateRange::new(start_date, end_date)?;
        let vehicle = self
            .repos
            .vehicles()
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Vehicle", vehicle_id))?;

        let candidates = self
            .repos
            .reservations()
            .find_conflicts(vehicle_id, &period)
            .await?;
        Ok(Availability::evaluate(vehicle.id, vehicle.status, &period, candidates))
    }

    // ── Transitions ─────────────────────────────────────────────

    /// Cancel a pending or confirmed reservation (owner or admin).
    /// Cancelling an already cancelled reservation is a no-op.
    pub async fn cancel(&self, ctx: &AuthContext, id: i32) -> DomainResult<Reservation> {
        let _guard = self.locks.acquire(LockKey::Reservation(id)).await?;

        let current = self.get(ctx, id).await?;
        if current.status == ReservationStatus::Cancelled {
            return Ok(current);
        }
        self.repos
            .reservations()
            .transition(id, ReservationStatus::Cancelled, self.clock.today())
            .await
    }

    /// Administrative status change, restricted to the lifecycle graph.
    /// Setting the current status again is a no-op.
    pub async fn update_status(
        &self,
        ctx: &AuthContext,
        id: i32,
        status: &str,
    ) -> DomainResult<Reservation> {
        ctx.require_admin()?;
        let target: ReservationStatus = status.trim().parse()?;

        let _guard = self.locks.acquire(LockKey::Reservation(id)).await?;

        let current = self
            .repos
            .reservations()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Reservation", id))?;
        if current.status == target {
            return Ok(current);
        }

        self.repos
            .reservations()
            .transition(id, target, self.clock.today())
            .await
    }

    /// Delete a reservation with its payment and damage reports (admin)
    pub async fn delete(&self, ctx: &AuthContext, id: i32) -> DomainResult<()> {
        ctx.require_admin()?;
        let _guard = self.locks.acquire(LockKey::Reservation(id)).await?;

        self.repos
            .reservations()
            .delete_cascade(id, self.clock.today())
            .await
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Owner or admin; anyone else sees `NotFound`
    pub async fn get(&self, ctx: &AuthContext, id: i32) -> DomainResult<Reservation> {
        self.repos
            .reservations()
            .find_by_id(id)
            .await?
            .filter(|r| ctx.can_access(r.user_id))
            .ok_or_else(|| DomainError::not_found("Reservation", id))
    }

    pub async fn list_for_user(&self, ctx: &AuthContext) -> DomainResult<Vec<ReservationView>> {
        let reservations = self.repos.reservations().find_for_user(ctx.user_id).await?;

        let mut views = Vec::with_capacity(reservations.len());
        for reservation in reservations {
            let payment = self
                .repos
                .payments()
                .find_for_reservation(reservation.id)
                .await?;
            views.push(ReservationView {
                payment: payment.as_ref().map(PaymentSummary::from),
                reservation,
            });
        }
        Ok(views)
    }

    pub async fn list_all(
        &self,
        ctx: &AuthContext,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<ReservationOverview>> {
        ctx.require_admin()?;
        let result = self.repos.reservations().find_all(page).await?;

        let mut items = Vec::with_capacity(result.items.len());
        for reservation in result.items {
            let payment_status = self
                .repos
                .payments()
                .find_for_reservation(reservation.id)
                .await?
                .map(|p| p.status);
            let has_damage = !self
                .repos
                .damage_reports()
                .find_for_reservation(reservation.id)
                .await?
                .is_empty();
            items.push(ReservationOverview {
                reservation,
                payment_status,
                has_damage,
            });
        }

        Ok(PaginatedResult::new(items, result.total, result.page, result.limit))
    }
}
