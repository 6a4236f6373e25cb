//! Rental price calculation
//!
//! Pure and storage-free. Monthly and yearly tiers are flat rates that do not
//! depend on the length of the requested interval; downstream consumers rely
//! on those exact values.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::model::{DateRange, RentalTier};
use crate::domain::money::{ensure_positive, round_money};
use crate::shared::DomainResult;

/// Days billed by the monthly tier
pub const MONTHLY_DAYS: i64 = 30;
/// Days billed by the yearly tier
pub const YEARLY_DAYS: i64 = 365;
/// Monthly tier multiplier (10% off)
pub const MONTHLY_FACTOR: Decimal = dec!(0.9);
/// Yearly tier multiplier (20% off)
pub const YEARLY_FACTOR: Decimal = dec!(0.8);

/// Total price of renting at `daily_rate` over `period` under `tier`.
///
/// * daily:   `daily_rate * days(period)`
/// * monthly: `daily_rate * 30 * 0.9`
/// * yearly:  `daily_rate * 365 * 0.8`
pub fn price(daily_rate: Decimal, period: &DateRange, tier: RentalTier) -> DomainResult<Decimal> {
    ensure_positive(daily_rate, "Daily rate")?;

    let total = match tier {
        RentalTier::Daily => daily_rate * Decimal::from(period.days()),
        RentalTier::Monthly => daily_rate * Decimal::from(MONTHLY_DAYS) * MONTHLY_FACTOR,
        RentalTier::Yearly => daily_rate * Decimal::from(YEARLY_DAYS) * YEARLY_FACTOR,
    };

    Ok(round_money(total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn period(start: (i32, u32, u32), end: (i32, u32, u32)) -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn daily_price_multiplies_days() {
        let p = period((2024, 6, 1), (2024, 6, 3));
        assert_eq!(price(dec!(50), &p, RentalTier::Daily).unwrap(), dec!(100));
    }

    #[test]
    fn monthly_price_is_flat() {
        let short = period((2024, 6, 1), (2024, 6, 2));
        let long = period((2024, 6, 1), (2024, 9, 1));
        assert_eq!(price(dec!(50), &short, RentalTier::Monthly).unwrap(), dec!(1350));
        assert_eq!(price(dec!(50), &long, RentalTier::Monthly).unwrap(), dec!(1350));
    }

    #[test]
    fn yearly_price_is_flat() {
        let p = period((2024, 1, 1), (2024, 1, 5));
        assert_eq!(price(dec!(50), &p, RentalTier::Yearly).unwrap(), dec!(14600));
    }

    #[test]
    fn fractional_rate_rounds_to_cents() {
        let p = period((2024, 6, 1), (2024, 6, 4));
        assert_eq!(price(dec!(33.33), &p, RentalTier::Daily).unwrap(), dec!(99.99));
        assert_eq!(price(dec!(49.99), &p, RentalTier::Monthly).unwrap(), dec!(1349.73));
    }

    #[test]
    fn non_positive_rate_is_rejected() {
        let p = period((2024, 6, 1), (2024, 6, 3));
        assert!(price(Decimal::ZERO, &p, RentalTier::Daily).is_err());
        assert!(price(dec!(-1), &p, RentalTier::Yearly).is_err());
    }

    #[test]
    fn same_inputs_same_price() {
        let p = period((2024, 2, 27), (2024, 3, 2));
        let a = price(dec!(72.5), &p, RentalTier::Daily).unwrap();
        let b = price(dec!(72.5), &p, RentalTier::Daily).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, dec!(290));
    }
}
