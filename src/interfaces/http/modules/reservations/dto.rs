//! Reservation DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::{CreateReservation, ReservationOverview, ReservationView};
use crate::domain::{
    DomainResult, PaymentMethod, PaymentStatus, PaymentSummary, RentalTier, Reservation,
    ReservationStatus,
};

/// Booking request; dates are inclusive calendar days
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "vehicle_id": 1,
    "start_date": "2024-06-01",
    "end_date": "2024-06-05",
    "rental_tier": "daily"
}))]
pub struct CreateReservationRequest {
    #[validate(range(min = 1, message = "vehicle_id must be positive"))]
    pub vehicle_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// `daily` (default), `monthly` or `yearly`
    #[serde(default, alias = "rental_type")]
    pub rental_tier: Option<String>,
}

impl CreateReservationRequest {
    pub fn into_command(self) -> DomainResult<CreateReservation> {
        let rental_tier = match self.rental_tier.as_deref() {
            None => RentalTier::default(),
            Some(tier) => tier.parse()?,
        };
        Ok(CreateReservation {
            vehicle_id: self.vehicle_id,
            start_date: self.start_date,
            end_date: self.end_date,
            rental_tier,
        })
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStatusRequest {
    /// `pending`, `confirmed`, `cancelled` or `completed`
    #[validate(length(min = 1, message = "status is required"))]
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationDto {
    pub id: i32,
    pub user_id: i32,
    pub vehicle_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[schema(value_type = String, example = "daily")]
    pub rental_tier: RentalTier,
    pub total_price: Decimal,
    #[schema(value_type = String, example = "confirmed")]
    pub status: ReservationStatus,
    pub damage_charge: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<Reservation> for ReservationDto {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            vehicle_id: r.vehicle_id,
            start_date: r.start_date,
            end_date: r.end_date,
            rental_tier: r.rental_tier,
            total_price: r.total_price,
            status: r.status,
            damage_charge: r.damage_charge,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentSummaryDto {
    pub payment_id: i32,
    #[schema(value_type = String, example = "completed")]
    pub status: PaymentStatus,
    pub amount: Decimal,
    #[schema(value_type = String, example = "credit_card")]
    pub method: PaymentMethod,
}

impl From<PaymentSummary> for PaymentSummaryDto {
    fn from(p: PaymentSummary) -> Self {
        Self {
            payment_id: p.payment_id,
            status: p.status,
            amount: p.amount,
            method: p.method,
        }
    }
}

/// A client's reservation with its payment summary
#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationViewDto {
    #[serde(flatten)]
    pub reservation: ReservationDto,
    pub payment: Option<PaymentSummaryDto>,
}

impl From<ReservationView> for ReservationViewDto {
    fn from(view: ReservationView) -> Self {
        Self {
            reservation: view.reservation.into(),
            payment: view.payment.map(PaymentSummaryDto::from),
        }
    }
}

/// Administrative listing row
#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationOverviewDto {
    #[serde(flatten)]
    pub reservation: ReservationDto,
    #[schema(value_type = Option<String>)]
    pub payment_status: Option<PaymentStatus>,
    pub has_damage: bool,
}

impl From<ReservationOverview> for ReservationOverviewDto {
    fn from(row: ReservationOverview) -> Self {
        Self {
            reservation: row.reservation.into(),
            payment_status: row.payment_status,
            has_damage: row.has_damage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(tier: Option<&str>) -> CreateReservationRequest {
        CreateReservationRequest {
            vehicle_id: 1,
            start_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            rental_tier: tier.map(String::from),
        }
    }

    #[test]
    fn tier_defaults_to_daily() {
        assert_eq!(request(None).into_command().unwrap().rental_tier, RentalTier::Daily);
        assert_eq!(
            request(Some("yearly")).into_command().unwrap().rental_tier,
            RentalTier::Yearly
        );
    }

    #[test]
    fn unknown_tier_is_rejected() {
        assert!(request(Some("weekly")).into_command().is_err());
    }

    #[test]
    fn rental_type_alias_is_accepted() {
        let body = r#"{"vehicle_id":2,"start_date":"2024-06-01","end_date":"2024-06-05","rental_type":"monthly"}"#;
        let parsed: CreateReservationRequest = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.rental_tier.as_deref(), Some("monthly"));
    }
}
