//! Vehicle domain entity

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::domain::money::ensure_positive;
use crate::shared::{DomainError, DomainResult};

string_enum! {
    /// Cached projection of the reservation set (plus the damage flag).
    ///
    /// Never authoritative for future intervals: availability of an interval
    /// is always decided from the reservations themselves.
    pub enum VehicleStatus ("vehicle status") {
        Available => "available",
        Reserved => "reserved",
        /// Out of the bookable pool until administratively cleared
        Maintenance => "maintenance",
    }
}

impl VehicleStatus {
    /// Recompute the cached status.
    ///
    /// `maintenance` is sticky: only the administrative clear path leaves it.
    pub fn derive(current: VehicleStatus, covered_today: bool) -> VehicleStatus {
        match current {
            VehicleStatus::Maintenance => VehicleStatus::Maintenance,
            _ if covered_today => VehicleStatus::Reserved,
            _ => VehicleStatus::Available,
        }
    }

    pub fn is_bookable(&self) -> bool {
        *self != VehicleStatus::Maintenance
    }
}

string_enum! {
    pub enum VehicleType ("vehicle type") {
        Sedan => "sedan",
        Suv => "suv",
        FourByFour => "4x4",
        Luxury => "luxury",
    }
}

impl VehicleType {
    pub fn category(&self) -> VehicleCategory {
        match self {
            VehicleType::Sedan | VehicleType::Suv => VehicleCategory::Medium,
            VehicleType::FourByFour => VehicleCategory::Large,
            VehicleType::Luxury => VehicleCategory::Small,
        }
    }
}

string_enum! {
    pub enum VehicleCategory ("vehicle category") {
        Small => "small",
        Medium => "medium",
        Large => "large",
    }
}

string_enum! {
    pub enum Location ("location") {
        City => "city",
        Mountains => "mountains",
        Desert => "desert",
        Snow => "snow",
    }
}

impl Location {
    /// Vehicle types suited to the terrain
    pub fn suitable_types(&self) -> &'static [VehicleType] {
        match self {
            Location::Mountains | Location::Snow => &[VehicleType::Suv, VehicleType::FourByFour],
            Location::Desert => &[VehicleType::FourByFour],
            Location::City => &[VehicleType::Sedan],
        }
    }
}

/// Fleet vehicle
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub id: i32,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub daily_rate: Decimal,
    pub status: VehicleStatus,
    pub vehicle_type: VehicleType,
    pub location: Location,
    pub category: VehicleCategory,
    pub created_at: DateTime<Utc>,
}

/// Vehicle to be registered by an administrator
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub daily_rate: Decimal,
    pub vehicle_type: VehicleType,
    pub location: Location,
}

impl NewVehicle {
    pub fn validate(&self, today: NaiveDate) -> DomainResult<()> {
        if self.make.trim().is_empty() || self.model.trim().is_empty() {
            return Err(DomainError::Validation("Make and model are required".into()));
        }
        let max_year = today.year() + 1;
        if self.year < 1900 || self.year > max_year {
            return Err(DomainError::Validation(format!(
                "Invalid year {}. Must be between 1900 and {}",
                self.year, max_year
            )));
        }
        ensure_positive(self.daily_rate, "Daily rate")
    }
}

/// Optional filters for fleet search; absent filters match everything
#[derive(Debug, Clone, Default)]
pub struct VehicleSearch {
    pub make: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub vehicle_type: Option<VehicleType>,
    pub location: Option<Location>,
}

impl VehicleSearch {
    pub fn validate(&self) -> DomainResult<()> {
        if matches!(self.min_price, Some(p) if p < Decimal::ZERO) {
            return Err(DomainError::Validation("min_price must not be negative".into()));
        }
        if matches!(self.max_price, Some(p) if p <= Decimal::ZERO) {
            return Err(DomainError::Validation("max_price must be positive".into()));
        }
        Ok(())
    }
}

/// A client's bookmarked vehicle
#[derive(Debug, Clone)]
pub struct Favorite {
    pub id: i32,
    pub user_id: i32,
    pub vehicle_id: i32,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn sedan() -> NewVehicle {
        NewVehicle {
            make: "Toyota".into(),
            model: "Corolla".into(),
            year: 2022,
            daily_rate: dec!(50),
            vehicle_type: VehicleType::Sedan,
            location: Location::City,
        }
    }

    #[test]
    fn maintenance_survives_recompute() {
        assert_eq!(
            VehicleStatus::derive(VehicleStatus::Maintenance, false),
            VehicleStatus::Maintenance
        );
        assert_eq!(
            VehicleStatus::derive(VehicleStatus::Maintenance, true),
            VehicleStatus::Maintenance
        );
    }

    #[test]
    fn derived_status_follows_today_coverage() {
        assert_eq!(
            VehicleStatus::derive(VehicleStatus::Available, true),
            VehicleStatus::Reserved
        );
        assert_eq!(
            VehicleStatus::derive(VehicleStatus::Reserved, false),
            VehicleStatus::Available
        );
    }

    #[test]
    fn vehicle_type_parses_4x4() {
        assert_eq!("4x4".parse::<VehicleType>().unwrap(), VehicleType::FourByFour);
        assert!("truck".parse::<VehicleType>().is_err());
    }

    #[test]
    fn category_is_inferred_from_type() {
        assert_eq!(VehicleType::Sedan.category(), VehicleCategory::Medium);
        assert_eq!(VehicleType::FourByFour.category(), VehicleCategory::Large);
        assert_eq!(VehicleType::Luxury.category(), VehicleCategory::Small);
    }

    #[test]
    fn terrain_selects_suitable_types() {
        assert_eq!(Location::Desert.suitable_types(), &[VehicleType::FourByFour]);
        assert!(Location::Snow.suitable_types().contains(&VehicleType::Suv));
        assert_eq!(Location::City.suitable_types(), &[VehicleType::Sedan]);
    }

    #[test]
    fn new_vehicle_validation() {
        assert!(sedan().validate(today()).is_ok());

        let mut v = sedan();
        v.year = 2026;
        assert!(v.validate(today()).is_err());

        let mut v = sedan();
        v.daily_rate = Decimal::ZERO;
        assert!(v.validate(today()).is_err());

        let mut v = sedan();
        v.make = "  ".into();
        assert!(v.validate(today()).is_err());
    }

    #[test]
    fn search_rejects_bad_price_bounds() {
        let search = VehicleSearch {
            max_price: Some(Decimal::ZERO),
            ..Default::default()
        };
        assert!(search.validate().is_err());
        assert!(VehicleSearch::default().validate().is_ok());
    }
}
