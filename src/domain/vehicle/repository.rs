//! Vehicle repository interface
//!
//! The registry owns every write to `Vehicle::status`: callers can clear the
//! maintenance flag or have it recomputed, never set it directly.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::model::{Favorite, NewVehicle, Vehicle, VehicleSearch, VehicleType};
use crate::domain::DomainResult;

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// Register a new vehicle (status `available`, category inferred)
    async fn save(&self, vehicle: NewVehicle) -> DomainResult<Vehicle>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Vehicle>>;

    /// Vehicles whose cached status is `available`
    async fn find_available(&self) -> DomainResult<Vec<Vehicle>>;

    /// Available vehicles matching every present filter
    async fn search(&self, filter: &VehicleSearch) -> DomainResult<Vec<Vehicle>>;

    /// Vehicles of any of the given types, regardless of status
    async fn find_by_types(&self, types: &[VehicleType]) -> DomainResult<Vec<Vehicle>>;

    /// Leave `maintenance` and recompute the derived status as of `today`.
    ///
    /// `InvalidState` when the vehicle is not in maintenance.
    async fn clear_maintenance(&self, id: i32, today: NaiveDate) -> DomainResult<Vehicle>;

    /// Delete a vehicle that has never been reserved.
    ///
    /// `Conflict` when any reservation (in any status) references it.
    async fn delete(&self, id: i32) -> DomainResult<()>;

    /// `Conflict` when the user already favorited the vehicle
    async fn add_favorite(&self, user_id: i32, vehicle_id: i32) -> DomainResult<Favorite>;

    async fn find_favorites(&self, user_id: i32) -> DomainResult<Vec<Favorite>>;
}
