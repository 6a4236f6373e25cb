//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: unified access to all per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use super::damage::DamageRepository;
use super::insurance::InsuranceRepository;
use super::payment::PaymentRepository;
use super::refund::RefundRepository;
use super::reservation::ReservationRepository;
use super::user::UserRepository;
use super::vehicle::VehicleRepository;

pub use crate::shared::DomainResult;

// ── RepositoryProvider ──────────────────────────────────────────

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let vehicle = repos.vehicles().find_by_id(3).await?;
///     let booked = repos.reservations().find_for_user(7).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn vehicles(&self) -> &dyn VehicleRepository;
    fn insurances(&self) -> &dyn InsuranceRepository;
    fn reservations(&self) -> &dyn ReservationRepository;
    fn payments(&self) -> &dyn PaymentRepository;
    fn refunds(&self) -> &dyn RefundRepository;
    fn damage_reports(&self) -> &dyn DamageRepository;
}
