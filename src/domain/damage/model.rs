//! Damage report domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::money::ensure_positive;
use crate::domain::reservation::{Reservation, ReservationStatus};
use crate::shared::{DomainError, DomainResult};

string_enum! {
    pub enum DamageStatus ("damage status") {
        Reported => "reported",
        Inspected => "inspected",
        Repaired => "repaired",
        Disputed => "disputed",
    }
}

#[derive(Debug, Clone)]
pub struct DamageReport {
    pub id: i32,
    pub reservation_id: i32,
    pub description: String,
    pub repair_cost: Decimal,
    pub status: DamageStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewDamageReport {
    pub reservation_id: i32,
    pub description: String,
    pub repair_cost: Decimal,
}

impl NewDamageReport {
    pub fn validate(&self) -> DomainResult<()> {
        if self.description.trim().is_empty() {
            return Err(DomainError::Validation("Description is required".into()));
        }
        ensure_positive(self.repair_cost, "Repair cost")
    }
}

/// Administrative edit; absent fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct DamageReportUpdate {
    pub status: Option<DamageStatus>,
    pub repair_cost: Option<Decimal>,
    pub description: Option<String>,
}

impl DamageReportUpdate {
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(cost) = self.repair_cost {
            ensure_positive(cost, "Repair cost")?;
        }
        if matches!(&self.description, Some(d) if d.trim().is_empty()) {
            return Err(DomainError::Validation("Description must not be empty".into()));
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.repair_cost.is_none() && self.description.is_none()
    }
}

/// Damage may be attached in any state except `cancelled`
pub fn ensure_reportable(reservation: &Reservation) -> DomainResult<()> {
    if reservation.status == ReservationStatus::Cancelled {
        return Err(DomainError::InvalidState(format!(
            "Cannot report damage on cancelled reservation {}",
            reservation.id
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn report(cost: Decimal) -> NewDamageReport {
        NewDamageReport {
            reservation_id: 1,
            description: "Scratched bumper".into(),
            repair_cost: cost,
        }
    }

    #[test]
    fn repair_cost_must_be_positive() {
        assert!(report(dec!(75)).validate().is_ok());
        assert!(matches!(
            report(Decimal::ZERO).validate(),
            Err(DomainError::Validation(_))
        ));
        assert!(report(dec!(-10)).validate().is_err());
    }

    #[test]
    fn blank_description_is_rejected() {
        let mut r = report(dec!(75));
        r.description = "   ".into();
        assert!(r.validate().is_err());
    }

    #[test]
    fn update_validates_present_fields_only() {
        assert!(DamageReportUpdate::default().validate().is_ok());
        let update = DamageReportUpdate {
            repair_cost: Some(dec!(0)),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn unknown_damage_status_is_rejected() {
        assert!("destroyed".parse::<DamageStatus>().is_err());
        assert_eq!("disputed".parse::<DamageStatus>().unwrap(), DamageStatus::Disputed);
    }
}
