//! Vehicle insurance policy

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::money::ensure_positive;
use crate::shared::{DomainError, DomainResult};

string_enum! {
    pub enum InsuranceKind ("insurance type") {
        Basic => "basic",
        Premium => "premium",
        Full => "full",
    }
}

#[derive(Debug, Clone)]
pub struct Insurance {
    pub id: i32,
    pub vehicle_id: i32,
    pub provider: String,
    pub kind: InsuranceKind,
    pub expiry_date: NaiveDate,
    pub coverage_amount: Decimal,
}

#[derive(Debug, Clone)]
pub struct NewInsurance {
    pub vehicle_id: i32,
    pub provider: String,
    pub kind: InsuranceKind,
    pub expiry_date: NaiveDate,
    pub coverage_amount: Decimal,
}

impl NewInsurance {
    pub fn validate(&self, today: NaiveDate) -> DomainResult<()> {
        if self.provider.trim().is_empty() {
            return Err(DomainError::Validation("Provider is required".into()));
        }
        if self.expiry_date < today {
            return Err(DomainError::Validation(format!(
                "Expiry date {} is in the past",
                self.expiry_date
            )));
        }
        ensure_positive(self.coverage_amount, "Coverage amount")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn policy(expiry: NaiveDate) -> NewInsurance {
        NewInsurance {
            vehicle_id: 1,
            provider: "Allianz".into(),
            kind: InsuranceKind::Premium,
            expiry_date: expiry,
            coverage_amount: dec!(10000),
        }
    }

    #[test]
    fn expiry_today_is_accepted() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert!(policy(today).validate(today).is_ok());
        assert!(policy(today.pred_opt().unwrap()).validate(today).is_err());
    }

    #[test]
    fn coverage_must_be_positive() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut p = policy(today);
        p.coverage_amount = Decimal::ZERO;
        assert!(p.validate(today).is_err());
    }
}
