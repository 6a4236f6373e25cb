//! Reservation aggregate
//!
//! The reservation set is the source of truth for vehicle availability.

pub mod availability;
pub mod model;
pub mod pricing;
pub mod repository;

pub use availability::Availability;
pub use model::{DateRange, NewReservation, RentalTier, Reservation, ReservationStatus};
pub use repository::ReservationRepository;
