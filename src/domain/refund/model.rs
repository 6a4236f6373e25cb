//! Refund domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::money::round_money;
use crate::domain::reservation::{Reservation, ReservationStatus};
use crate::shared::{DomainError, DomainResult};

/// Share of the total price returned to the client (flat 20% penalty)
pub const REFUND_RATE: Decimal = dec!(0.8);

string_enum! {
    pub enum RefundStatus ("refund status") {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
    }
}

string_enum! {
    /// Terminal outcome of a refund request
    pub enum RefundDecision ("refund decision") {
        Approved => "approved",
        Rejected => "rejected",
    }
}

impl From<RefundDecision> for RefundStatus {
    fn from(d: RefundDecision) -> Self {
        match d {
            RefundDecision::Approved => RefundStatus::Approved,
            RefundDecision::Rejected => RefundStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Refund {
    pub id: i32,
    /// Cleared when the reservation is deleted; the refund stays for audit
    pub reservation_id: Option<i32>,
    pub requested_by: i32,
    pub amount: Decimal,
    pub status: RefundStatus,
    pub reason: String,
    pub created_at: DateTime<Utc>,
    /// Set only on decision
    pub processed_at: Option<DateTime<Utc>>,
}

impl Refund {
    /// Only the requesting user decides their refund
    pub fn ensure_decidable_by(&self, user_id: i32) -> DomainResult<()> {
        if self.requested_by != user_id {
            return Err(DomainError::Unauthorized(format!(
                "Refund {} belongs to another user",
                self.id
            )));
        }
        if self.status != RefundStatus::Pending {
            return Err(DomainError::InvalidState(format!(
                "Refund {} was already {}",
                self.id, self.status
            )));
        }
        Ok(())
    }
}

pub fn refund_amount(total_price: Decimal) -> Decimal {
    round_money(total_price * REFUND_RATE)
}

/// Refunds are requested only for completed or cancelled reservations
pub fn ensure_refundable(reservation: &Reservation) -> DomainResult<()> {
    match reservation.status {
        ReservationStatus::Completed | ReservationStatus::Cancelled => Ok(()),
        status => Err(DomainError::InvalidState(format!(
            "Refund only allowed for completed or cancelled reservations (reservation {} is {})",
            reservation.id, status
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reservation::RentalTier;
    use chrono::NaiveDate;

    fn reservation(status: ReservationStatus) -> Reservation {
        Reservation {
            id: 2,
            user_id: 4,
            vehicle_id: 1,
            start_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
            rental_tier: RentalTier::Daily,
            total_price: dec!(200),
            status,
            damage_charge: Decimal::ZERO,
            created_at: Utc::now(),
        }
    }

    fn refund(status: RefundStatus) -> Refund {
        Refund {
            id: 9,
            reservation_id: Some(2),
            requested_by: 4,
            amount: dec!(160),
            status,
            reason: String::new(),
            created_at: Utc::now(),
            processed_at: None,
        }
    }

    #[test]
    fn refund_is_eighty_percent() {
        assert_eq!(refund_amount(dec!(200)), dec!(160));
        assert_eq!(refund_amount(dec!(99.99)), dec!(79.99));
    }

    #[test]
    fn only_terminal_reservations_are_refundable() {
        assert!(ensure_refundable(&reservation(ReservationStatus::Completed)).is_ok());
        assert!(ensure_refundable(&reservation(ReservationStatus::Cancelled)).is_ok());
        assert!(matches!(
            ensure_refundable(&reservation(ReservationStatus::Pending)),
            Err(DomainError::InvalidState(_))
        ));
        assert!(ensure_refundable(&reservation(ReservationStatus::Confirmed)).is_err());
    }

    #[test]
    fn decided_refund_is_locked() {
        let r = refund(RefundStatus::Approved);
        assert!(matches!(
            r.ensure_decidable_by(4),
            Err(DomainError::InvalidState(_))
        ));
    }

    #[test]
    fn other_user_cannot_decide() {
        let r = refund(RefundStatus::Pending);
        assert!(matches!(
            r.ensure_decidable_by(5),
            Err(DomainError::Unauthorized(_))
        ));
        assert!(r.ensure_decidable_by(4).is_ok());
    }

    #[test]
    fn pending_is_not_a_decision() {
        assert!("pending".parse::<RefundDecision>().is_err());
        assert_eq!(
            RefundStatus::from("rejected".parse::<RefundDecision>().unwrap()),
            RefundStatus::Rejected
        );
    }
}
