//! Statistics DTOs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::{FleetStats, TopVehicle};

#[derive(Debug, Serialize, ToSchema)]
pub struct TopVehicleDto {
    pub vehicle_id: i32,
    pub make: Option<String>,
    pub model: Option<String>,
    pub reservations: u64,
}

impl From<TopVehicle> for TopVehicleDto {
    fn from(v: TopVehicle) -> Self {
        Self {
            vehicle_id: v.vehicle_id,
            make: v.make,
            model: v.model,
            reservations: v.reservations,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FleetStatsDto {
    pub total_reservations: u64,
    /// Sum of completed payments
    pub revenue: Decimal,
    pub damage_costs: Decimal,
    pub top_vehicles: Vec<TopVehicleDto>,
}

impl From<FleetStats> for FleetStatsDto {
    fn from(s: FleetStats) -> Self {
        Self {
            total_reservations: s.total_reservations,
            revenue: s.revenue,
            damage_costs: s.damage_costs,
            top_vehicles: s.top_vehicles.into_iter().map(TopVehicleDto::from).collect(),
        }
    }
}
