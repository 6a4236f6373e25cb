#[macro_use]
mod macros;

pub mod damage;
pub mod insurance;
pub mod money;
pub mod payment;
pub mod refund;
pub mod repositories;
pub mod reservation;
pub mod user;
pub mod vehicle;

// Re-export commonly used types
pub use damage::{DamageReport, DamageReportUpdate, DamageStatus, NewDamageReport};
pub use insurance::{Insurance, InsuranceKind, NewInsurance};
pub use payment::{Payment, PaymentMethod, PaymentStatus, PaymentSummary};
pub use refund::{Refund, RefundDecision, RefundStatus};
pub use repositories::{DomainResult, RepositoryProvider};
pub use reservation::{DateRange, NewReservation, RentalTier, Reservation, ReservationStatus};
pub use user::{AuthContext, NewUser, Role, User, UserProfile};
pub use vehicle::{
    Favorite, Location, NewVehicle, Vehicle, VehicleCategory, VehicleSearch, VehicleStatus,
    VehicleType,
};

pub use crate::shared::DomainError;
