//! Vehicle DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::VehicleDetails;
use crate::domain::reservation::Availability;
use crate::domain::{
    DomainResult, Favorite, Insurance, InsuranceKind, Location, NewInsurance, NewVehicle,
    Vehicle, VehicleCategory, VehicleSearch, VehicleStatus, VehicleType,
};
use crate::interfaces::http::modules::reservations::ReservationDto;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "make": "Toyota",
    "model": "Land Cruiser",
    "year": 2022,
    "daily_rate": 95.0,
    "vehicle_type": "4x4",
    "location": "desert"
}))]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 100, message = "make is required"))]
    pub make: String,
    #[validate(length(min = 1, max = 100, message = "model is required"))]
    pub model: String,
    pub year: i32,
    pub daily_rate: Decimal,
    /// `sedan`, `suv`, `4x4` or `luxury`
    pub vehicle_type: String,
    /// `city`, `mountains`, `desert` or `snow`
    pub location: String,
}

impl CreateVehicleRequest {
    pub fn into_domain(self) -> DomainResult<NewVehicle> {
        Ok(NewVehicle {
            vehicle_type: self.vehicle_type.parse::<VehicleType>()?,
            location: self.location.parse::<Location>()?,
            make: self.make,
            model: self.model,
            year: self.year,
            daily_rate: self.daily_rate,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VehicleDto {
    pub id: i32,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub daily_rate: Decimal,
    #[schema(value_type = String, example = "available")]
    pub status: VehicleStatus,
    #[schema(value_type = String, example = "4x4")]
    pub vehicle_type: VehicleType,
    #[schema(value_type = String, example = "desert")]
    pub location: Location,
    #[schema(value_type = String, example = "large")]
    pub category: VehicleCategory,
    pub created_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleDto {
    fn from(v: Vehicle) -> Self {
        Self {
            id: v.id,
            make: v.make,
            model: v.model,
            year: v.year,
            daily_rate: v.daily_rate,
            status: v.status,
            vehicle_type: v.vehicle_type,
            location: v.location,
            category: v.category,
            created_at: v.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VehicleDetailsDto {
    #[serde(flatten)]
    pub vehicle: VehicleDto,
    pub insurances: Vec<InsuranceDto>,
}

impl From<VehicleDetails> for VehicleDetailsDto {
    fn from(details: VehicleDetails) -> Self {
        Self {
            vehicle: details.vehicle.into(),
            insurances: details.insurances.into_iter().map(InsuranceDto::from).collect(),
        }
    }
}

/// `GET /vehicles/search` query; every filter is optional
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    pub make: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub vehicle_type: Option<String>,
    pub location: Option<String>,
}

impl SearchQuery {
    pub fn into_domain(self) -> DomainResult<VehicleSearch> {
        Ok(VehicleSearch {
            make: self.make.filter(|m| !m.trim().is_empty()),
            min_price: self.min_price,
            max_price: self.max_price,
            vehicle_type: self
                .vehicle_type
                .as_deref()
                .map(str::parse::<VehicleType>)
                .transpose()?,
            location: self
                .location
                .as_deref()
                .map(str::parse::<Location>)
                .transpose()?,
        })
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AvailabilityQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityDto {
    pub vehicle_id: i32,
    pub available: bool,
    #[schema(value_type = String)]
    pub vehicle_status: VehicleStatus,
    pub conflicts: Vec<ReservationDto>,
}

impl From<Availability> for AvailabilityDto {
    fn from(a: Availability) -> Self {
        Self {
            vehicle_id: a.vehicle_id,
            available: a.is_available(),
            vehicle_status: a.vehicle_status,
            conflicts: a.conflicts.into_iter().map(ReservationDto::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateInsuranceRequest {
    #[validate(length(min = 1, max = 100, message = "provider is required"))]
    pub provider: String,
    /// `basic`, `premium` or `full`
    pub insurance_type: String,
    pub expiry_date: NaiveDate,
    pub coverage_amount: Decimal,
}

impl CreateInsuranceRequest {
    pub fn into_domain(self, vehicle_id: i32) -> DomainResult<NewInsurance> {
        Ok(NewInsurance {
            vehicle_id,
            kind: self.insurance_type.parse::<InsuranceKind>()?,
            provider: self.provider,
            expiry_date: self.expiry_date,
            coverage_amount: self.coverage_amount,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InsuranceDto {
    pub id: i32,
    pub vehicle_id: i32,
    pub provider: String,
    #[schema(value_type = String, example = "premium")]
    pub insurance_type: InsuranceKind,
    pub expiry_date: NaiveDate,
    pub coverage_amount: Decimal,
}

impl From<Insurance> for InsuranceDto {
    fn from(i: Insurance) -> Self {
        Self {
            id: i.id,
            vehicle_id: i.vehicle_id,
            provider: i.provider,
            insurance_type: i.kind,
            expiry_date: i.expiry_date,
            coverage_amount: i.coverage_amount,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FavoriteDto {
    pub id: i32,
    pub vehicle_id: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Favorite> for FavoriteDto {
    fn from(f: Favorite) -> Self {
        Self {
            id: f.id,
            vehicle_id: f.vehicle_id,
            created_at: f.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_vehicle_type_is_rejected() {
        let request = CreateVehicleRequest {
            make: "Toyota".into(),
            model: "Hilux".into(),
            year: 2021,
            daily_rate: Decimal::new(7500, 2),
            vehicle_type: "truck".into(),
            location: "desert".into(),
        };
        assert!(request.into_domain().is_err());
    }

    #[test]
    fn blank_make_filter_is_ignored() {
        let query = SearchQuery {
            make: Some("  ".into()),
            location: Some("snow".into()),
            ..Default::default()
        };
        let search = query.into_domain().unwrap();
        assert!(search.make.is_none());
        assert_eq!(search.location, Some(Location::Snow));
    }
}
