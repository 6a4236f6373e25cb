//! Availability rule
//!
//! A vehicle is bookable for an interval iff it is not in maintenance and no
//! non-cancelled reservation on it overlaps the interval. The same rule runs
//! for read-only checks and inside the booking transaction.

use super::model::{DateRange, Reservation, ReservationStatus};
use crate::domain::vehicle::VehicleStatus;
use crate::shared::{DomainError, DomainResult};

#[derive(Debug, Clone)]
pub struct Availability {
    pub vehicle_id: i32,
    pub vehicle_status: VehicleStatus,
    /// Overlapping non-cancelled reservations
    pub conflicts: Vec<Reservation>,
}

impl Availability {
    /// Evaluate `period` against the vehicle's reservations; `candidates` may
    /// be a superset (other vehicles, cancelled or disjoint bookings are
    /// ignored).
    pub fn evaluate(
        vehicle_id: i32,
        vehicle_status: VehicleStatus,
        period: &DateRange,
        candidates: Vec<Reservation>,
    ) -> Self {
        let conflicts = candidates
            .into_iter()
            .filter(|r| r.vehicle_id == vehicle_id)
            .filter(|r| r.status != ReservationStatus::Cancelled)
            .filter(|r| r.period().overlaps(period))
            .collect();

        Self {
            vehicle_id,
            vehicle_status,
            conflicts,
        }
    }

    pub fn is_available(&self) -> bool {
        self.vehicle_status.is_bookable() && self.conflicts.is_empty()
    }

    /// `BookingConflict` carrying the overlapping reservations when not bookable
    pub fn into_result(self) -> DomainResult<()> {
        if self.is_available() {
            return Ok(());
        }
        let reason = if self.conflicts.is_empty() {
            "vehicle is under maintenance".to_string()
        } else {
            format!(
                "requested period overlaps {} existing reservation(s)",
                self.conflicts.len()
            )
        };
        Err(DomainError::BookingConflict {
            vehicle_id: self.vehicle_id,
            reason,
            conflicts: self.conflicts,
        })
    }
}
