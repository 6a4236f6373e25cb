//! Vehicle registry service: inventory, insurance and favorites

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    AuthContext, DomainError, DomainResult, Favorite, Insurance, Location, NewInsurance,
    NewVehicle, RepositoryProvider, Vehicle, VehicleSearch,
};
use crate::shared::{Clock, LockKey, SharedLocks};

/// A vehicle with its insurance policies
#[derive(Debug, Clone)]
pub struct VehicleDetails {
    pub vehicle: Vehicle,
    pub insurances: Vec<Insurance>,
}

pub struct FleetService {
    repos: Arc<dyn RepositoryProvider>,
    locks: SharedLocks,
    clock: Arc<dyn Clock>,
}

impl FleetService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, locks: SharedLocks, clock: Arc<dyn Clock>) -> Self {
        Self { repos, locks, clock }
    }

    pub async fn add_vehicle(&self, ctx: &AuthContext, vehicle: NewVehicle) -> DomainResult<Vehicle> {
        ctx.require_admin()?;
        vehicle.validate(self.clock.today())?;

        let saved = self.repos.vehicles().save(vehicle).await?;
        info!(
            vehicle_id = saved.id,
            make = %saved.make,
            model = %saved.model,
            daily_rate = %saved.daily_rate,
            "Vehicle added"
        );
        Ok(saved)
    }

    pub async fn get_vehicle(&self, id: i32) -> DomainResult<VehicleDetails> {
        let vehicle = self
            .repos
            .vehicles()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Vehicle", id))?;
        let insurances = self.repos.insurances().find_for_vehicle(id).await?;
        Ok(VehicleDetails { vehicle, insurances })
    }

    pub async fn list_available(&self) -> DomainResult<Vec<Vehicle>> {
        self.repos.vehicles().find_available().await
    }

    pub async fn search(&self, filter: VehicleSearch) -> DomainResult<Vec<Vehicle>> {
        filter.validate()?;
        self.repos.vehicles().search(&filter).await
    }

    /// Vehicles suited to a terrain, whatever their current status
    pub async fn by_terrain(&self, location: Location) -> DomainResult<Vec<Vehicle>> {
        self.repos
            .vehicles()
            .find_by_types(location.suitable_types())
            .await
    }

    /// The administrative exit from `maintenance`
    pub async fn clear_maintenance(&self, ctx: &AuthContext, id: i32) -> DomainResult<Vehicle> {
        ctx.require_admin()?;
        let _guard = self.locks.acquire(LockKey::Vehicle(id)).await?;

        let vehicle = self
            .repos
            .vehicles()
            .clear_maintenance(id, self.clock.today())
            .await?;
        info!(vehicle_id = id, status = %vehicle.status, "Vehicle maintenance cleared");
        Ok(vehicle)
    }

    pub async fn delete_vehicle(&self, ctx: &AuthContext, id: i32) -> DomainResult<()> {
        ctx.require_admin()?;
        let _guard = self.locks.acquire(LockKey::Vehicle(id)).await?;

        self.repos.vehicles().delete(id).await?;
        info!(vehicle_id = id, "Vehicle deleted");
        Ok(())
    }

    pub async fn add_insurance(
        &self,
        ctx: &AuthContext,
        insurance: NewInsurance,
    ) -> DomainResult<Insurance> {
        ctx.require_admin()?;
        insurance.validate(self.clock.today())?;

        let saved = self.repos.insurances().save(insurance).await?;
        info!(insurance_id = saved.id, vehicle_id = saved.vehicle_id, kind = %saved.kind, "Insurance added");
        Ok(saved)
    }

    pub async fn add_favorite(&self, ctx: &AuthContext, vehicle_id: i32) -> DomainResult<Favorite> {
        self.repos
            .vehicles()
            .add_favorite(ctx.user_id, vehicle_id)
            .await
    }

    pub async fn list_favorites(&self, ctx: &AuthContext) -> DomainResult<Vec<Favorite>> {
        self.repos.vehicles().find_favorites(ctx.user_id).await
    }
}
