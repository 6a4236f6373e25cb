//! Oversight statistics

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::{AuthContext, DomainResult, RepositoryProvider};

const TOP_VEHICLES: u64 = 3;

#[derive(Debug, Clone)]
pub struct TopVehicle {
    pub vehicle_id: i32,
    pub make: Option<String>,
    pub model: Option<String>,
    pub reservations: u64,
}

#[derive(Debug, Clone)]
pub struct FleetStats {
    pub total_reservations: u64,
    /// Sum of completed payments
    pub revenue: Decimal,
    pub damage_costs: Decimal,
    pub top_vehicles: Vec<TopVehicle>,
}

pub struct ReportingService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ReportingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn stats(&self, ctx: &AuthContext) -> DomainResult<FleetStats> {
        ctx.require_admin()?;

        let total_reservations = self.repos.reservations().count().await?;
        let revenue = self.repos.payments().completed_revenue().await?;
        let damage_costs = self.repos.damage_reports().total_repair_costs().await?;

        let mut top_vehicles = Vec::new();
        for (vehicle_id, reservations) in self
            .repos
            .reservations()
            .busiest_vehicles(TOP_VEHICLES)
            .await?
        {
            let vehicle = self.repos.vehicles().find_by_id(vehicle_id).await?;
            top_vehicles.push(TopVehicle {
                vehicle_id,
                make: vehicle.as_ref().map(|v| v.make.clone()),
                model: vehicle.map(|v| v.model),
                reservations,
            });
        }

        Ok(FleetStats {
            total_reservations,
            revenue,
            damage_costs,
            top_vehicles,
        })
    }
}
