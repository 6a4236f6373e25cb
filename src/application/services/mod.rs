//! Application services

mod damage;
mod fleet;
mod payment;
mod refund;
mod reporting;
mod reservation;

pub use damage::DamageService;
pub use fleet::{FleetService, VehicleDetails};
pub use payment::{PaymentReceipt, PaymentService};
pub use refund::RefundService;
pub use reporting::{FleetStats, ReportingService, TopVehicle};
pub use reservation::{CreateReservation, ReservationOverview, ReservationService, ReservationView};

/// Lifecycle counters exported at `/metrics`
pub mod counters {
    pub const RESERVATIONS_CREATED: &str = "rental_reservations_created_total";
    pub const BOOKING_CONFLICTS: &str = "rental_booking_conflicts_total";
    pub const PAYMENTS_COMPLETED: &str = "rental_payments_completed_total";
    pub const REFUNDS_REQUESTED: &str = "rental_refunds_requested_total";
    pub const DAMAGE_REPORTS: &str = "rental_damage_reports_total";
}
