//! Monetary amounts
//!
//! Amounts are `Decimal` with two fractional digits in the domain and whole
//! cents in storage.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::shared::{DomainError, DomainResult};

/// Round to cents, half away from zero
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub fn to_cents(amount: Decimal) -> DomainResult<i64> {
    (round_money(amount) * Decimal::ONE_HUNDRED)
        .to_i64()
        .ok_or_else(|| DomainError::Validation(format!("Amount out of range: {}", amount)))
}

pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Reject zero and negative amounts
pub fn ensure_positive(amount: Decimal, field: &str) -> DomainResult<()> {
    if amount > Decimal::ZERO {
        Ok(())
    } else {
        Err(DomainError::Validation(format!("{} must be positive", field)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn cents_conversion_keeps_two_digits() {
        assert_eq!(to_cents(dec!(49.99)).unwrap(), 4999);
        assert_eq!(from_cents(4999), dec!(49.99));
        assert_eq!(to_cents(dec!(0.005)).unwrap(), 1);
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        assert!(ensure_positive(dec!(0.01), "repair_cost").is_ok());
        assert!(ensure_positive(Decimal::ZERO, "repair_cost").is_err());
        assert!(ensure_positive(dec!(-3), "repair_cost").is_err());
    }
}
