//! Damage report DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{
    DamageReport, DamageReportUpdate, DamageStatus, DomainResult, NewDamageReport,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDamageReportRequest {
    #[validate(range(min = 1, message = "reservation_id must be positive"))]
    pub reservation_id: i32,
    #[validate(length(min = 1, max = 2000, message = "description is required"))]
    pub description: String,
    pub repair_cost: Decimal,
}

impl From<CreateDamageReportRequest> for NewDamageReport {
    fn from(r: CreateDamageReportRequest) -> Self {
        Self {
            reservation_id: r.reservation_id,
            description: r.description,
            repair_cost: r.repair_cost,
        }
    }
}

/// Partial update; absent fields are left unchanged
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateDamageReportRequest {
    /// `reported`, `inspected`, `repaired` or `disputed`
    pub status: Option<String>,
    pub repair_cost: Option<Decimal>,
    #[validate(length(min = 1, max = 2000))]
    pub description: Option<String>,
}

impl UpdateDamageReportRequest {
    pub fn into_domain(self) -> DomainResult<DamageReportUpdate> {
        Ok(DamageReportUpdate {
            status: self
                .status
                .as_deref()
                .map(str::parse::<DamageStatus>)
                .transpose()?,
            repair_cost: self.repair_cost,
            description: self.description,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DamageReportDto {
    pub id: i32,
    pub reservation_id: i32,
    pub description: String,
    pub repair_cost: Decimal,
    #[schema(value_type = String, example = "reported")]
    pub status: DamageStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DamageReport> for DamageReportDto {
    fn from(d: DamageReport) -> Self {
        Self {
            id: d.id,
            reservation_id: d.reservation_id,
            description: d.description,
            repair_cost: d.repair_cost,
            status: d.status,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_parses_status() {
        let request = UpdateDamageReportRequest {
            status: Some("repaired".into()),
            ..Default::default()
        };
        let update = request.into_domain().unwrap();
        assert_eq!(update.status, Some(DamageStatus::Repaired));
        assert!(update.repair_cost.is_none());
    }

    #[test]
    fn unknown_damage_status_is_rejected() {
        let request = UpdateDamageReportRequest {
            status: Some("totalled".into()),
            ..Default::default()
        };
        assert!(request.into_domain().is_err());
    }
}
