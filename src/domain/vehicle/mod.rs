//! Vehicle aggregate
//!
//! Fleet records, their derived status and client favorites.

pub mod model;
pub mod repository;

pub use model::{
    Favorite, Location, NewVehicle, Vehicle, VehicleCategory, VehicleSearch, VehicleStatus,
    VehicleType,
};
pub use repository::VehicleRepository;
