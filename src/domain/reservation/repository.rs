//! Reservation repository interface
//!
//! Every mutating method here is one atomic unit: the implementation checks
//! its guard conditions and applies its writes inside a single transaction,
//! so a rejected call leaves no trace.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::model::{DateRange, NewReservation, Reservation, ReservationStatus};
use crate::domain::DomainResult;
use crate::shared::{PaginatedResult, PaginationParams};

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>>;

    /// A user's reservations, newest start date first
    async fn find_for_user(&self, user_id: i32) -> DomainResult<Vec<Reservation>>;

    async fn find_all(&self, page: PaginationParams) -> DomainResult<PaginatedResult<Reservation>>;

    /// Non-cancelled reservations of the vehicle whose interval overlaps
    /// `period` (inclusive bounds)
    async fn find_conflicts(
        &self,
        vehicle_id: i32,
        period: &DateRange,
    ) -> DomainResult<Vec<Reservation>>;

    /// Check availability and insert in one transaction.
    ///
    /// Fails with `NotFound` when the vehicle is absent and `BookingConflict`
    /// when it is in maintenance or the interval overlaps. On success the
    /// reservation is `pending` and the vehicle's derived status has been
    /// recomputed as of `today`.
    async fn create_if_available(
        &self,
        reservation: NewReservation,
        today: NaiveDate,
    ) -> DomainResult<Reservation>;

    /// Compare-and-set status change, legal only from
    /// `ReservationStatus::sources_of(target)`. Recomputes the vehicle's
    /// derived status.
    async fn transition(
        &self,
        id: i32,
        target: ReservationStatus,
        today: NaiveDate,
    ) -> DomainResult<Reservation>;

    /// Delete with its payment and damage reports; refunds are kept with
    /// their reservation reference cleared
    async fn delete_cascade(&self, id: i32, today: NaiveDate) -> DomainResult<()>;

    async fn count(&self) -> DomainResult<u64>;

    /// `(vehicle_id, reservation count)` pairs, busiest first
    async fn busiest_vehicles(&self, limit: u64) -> DomainResult<Vec<(i32, u64)>>;
}
