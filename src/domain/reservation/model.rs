//! Reservation domain entity

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::shared::{DomainError, DomainResult};

string_enum! {
    /// Reservation lifecycle status
    pub enum ReservationStatus ("reservation status") {
        /// Created, awaiting payment
        Pending => "pending",
        /// Paid (or confirmed by an administrator)
        Confirmed => "confirmed",
        /// Cancelled; its interval no longer blocks bookings
        Cancelled => "cancelled",
        /// Rental period over
        Completed => "completed",
    }
}

impl ReservationStatus {
    /// Pending and confirmed reservations hold their interval
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }

    /// States from which `target` may be entered.
    ///
    /// ```text
    /// pending ──► confirmed ──► completed
    ///    │            │
    ///    └──► cancelled ◄┘
    /// ```
    pub fn sources_of(target: ReservationStatus) -> &'static [ReservationStatus] {
        match target {
            Self::Pending => &[],
            Self::Confirmed => &[Self::Pending],
            Self::Cancelled => &[Self::Pending, Self::Confirmed],
            Self::Completed => &[Self::Confirmed],
        }
    }

    pub fn can_transition_to(&self, target: ReservationStatus) -> bool {
        Self::sources_of(target).contains(self)
    }
}

string_enum! {
    /// Pricing mode chosen at booking time
    pub enum RentalTier ("rental tier") {
        Daily => "daily",
        Monthly => "monthly",
        Yearly => "yearly",
    }
}

impl Default for RentalTier {
    fn default() -> Self {
        Self::Daily
    }
}

/// Inclusive calendar interval `[start, end]` with `start < end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> DomainResult<Self> {
        if start >= end {
            return Err(DomainError::Validation(format!(
                "Invalid date range: end date {} must be after start date {}",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whole days between start and end
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Inclusive overlap: touching end/start dates count as a conflict
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.end >= other.start && self.start <= other.end
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Vehicle booking
#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    pub id: i32,
    pub user_id: i32,
    pub vehicle_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub rental_tier: RentalTier,
    /// Fixed at creation
    pub total_price: Decimal,
    pub status: ReservationStatus,
    /// Repair cost of the latest damage report, zero when none
    pub damage_charge: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    pub fn period(&self) -> DateRange {
        DateRange {
            start: self.start_date,
            end: self.end_date,
        }
    }

    pub fn is_owned_by(&self, user_id: i32) -> bool {
        self.user_id == user_id
    }

    /// Check that moving to `target` is a legal lifecycle step
    pub fn ensure_transition(&self, target: ReservationStatus) -> DomainResult<()> {
        if self.status.can_transition_to(target) {
            Ok(())
        } else {
            Err(DomainError::InvalidState(format!(
                "Reservation {} cannot move from {} to {}",
                self.id, self.status, target
            )))
        }
    }
}

/// Reservation to be inserted, price already computed
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub user_id: i32,
    pub vehicle_id: i32,
    pub period: DateRange,
    pub rental_tier: RentalTier,
    pub total_price: Decimal,
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn range(a: u32, b: u32) -> DateRange {
        DateRange::new(date(2024, 6, a), date(2024, 6, b)).unwrap()
    }

    fn sample(status: ReservationStatus) -> Reservation {
        Reservation {
            id: 1,
            user_id: 10,
            vehicle_id: 3,
            start_date: date(2024, 6, 1),
            end_date: date(2024, 6, 3),
            rental_tier: RentalTier::Daily,
            total_price: dec!(100),
            status,
            damage_charge: Decimal::ZERO,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_or_reversed_range_is_rejected() {
        assert!(DateRange::new(date(2024, 6, 3), date(2024, 6, 3)).is_err());
        assert!(DateRange::new(date(2024, 6, 4), date(2024, 6, 3)).is_err());
    }

    #[test]
    fn touching_ranges_overlap() {
        assert!(range(1, 5).overlaps(&range(5, 8)));
        assert!(range(5, 8).overlaps(&range(1, 5)));
    }

    #[test]
    fn disjoint_ranges_do_not_overlap() {
        assert!(!range(1, 4).overlaps(&range(5, 8)));
        assert!(!range(10, 12).overlaps(&range(5, 8)));
    }

    #[test]
    fn contained_range_overlaps() {
        assert!(range(1, 20).overlaps(&range(5, 6)));
    }

    #[test]
    fn covers_is_inclusive() {
        let r = range(2, 4);
        assert!(r.covers(date(2024, 6, 2)));
        assert!(r.covers(date(2024, 6, 4)));
        assert!(!r.covers(date(2024, 6, 5)));
    }

    #[test]
    fn lifecycle_transitions() {
        use ReservationStatus::*;

        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Completed));
        assert!(Confirmed.can_transition_to(Cancelled));

        assert!(!Pending.can_transition_to(Completed));
        assert!(!Cancelled.can_transition_to(Confirmed));
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Confirmed.can_transition_to(Pending));
    }

    #[test]
    fn terminal_reservation_rejects_transition() {
        let r = sample(ReservationStatus::Cancelled);
        assert!(matches!(
            r.ensure_transition(ReservationStatus::Confirmed),
            Err(DomainError::InvalidState(_))
        ));
        assert!(sample(ReservationStatus::Pending)
            .ensure_transition(ReservationStatus::Confirmed)
            .is_ok());
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(matches!(
            "archived".parse::<ReservationStatus>(),
            Err(DomainError::Validation(_))
        ));
        assert_eq!(
            "completed".parse::<ReservationStatus>().unwrap(),
            ReservationStatus::Completed
        );
    }

    #[test]
    fn live_statuses() {
        assert!(ReservationStatus::Pending.is_live());
        assert!(ReservationStatus::Confirmed.is_live());
        assert!(!ReservationStatus::Cancelled.is_live());
        assert!(!ReservationStatus::Completed.is_live());
    }
}
