//! Application layer: one service per use-case family
//!
//! Services take the caller's `AuthContext` explicitly and never read
//! ambient request state.

pub mod identity;
pub mod services;

use std::sync::Arc;

pub use identity::{AuthResult, IdentityService, Registration};
pub use services::{
    counters, CreateReservation, DamageService, FleetService, FleetStats, PaymentReceipt,
    PaymentService, RefundService, ReportingService, ReservationOverview, ReservationService,
    ReservationView, TopVehicle, VehicleDetails,
};

use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::{JwtConfig, PasswordHasher};
use crate::shared::{Clock, SharedLocks};

/// Every application service, wired to one repository provider, one lock
/// registry and one clock.
pub struct RentalServices {
    pub identity: IdentityService,
    pub fleet: FleetService,
    pub reservations: ReservationService,
    pub payments: PaymentService,
    pub refunds: RefundService,
    pub damage: DamageService,
    pub reporting: ReportingService,
}

impl RentalServices {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        locks: SharedLocks,
        clock: Arc<dyn Clock>,
        jwt_config: JwtConfig,
        hasher: PasswordHasher,
    ) -> Self {
        Self {
            identity: IdentityService::new(repos.clone(), jwt_config, hasher),
            fleet: FleetService::new(repos.clone(), locks.clone(), clock.clone()),
            reservations: ReservationService::new(repos.clone(), locks.clone(), clock.clone()),
            payments: PaymentService::new(repos.clone(), locks.clone()),
            refunds: RefundService::new(repos.clone(), locks.clone(), clock.clone()),
            damage: DamageService::new(repos.clone(), locks, clock),
            reporting: ReportingService::new(repos),
        }
    }
}
