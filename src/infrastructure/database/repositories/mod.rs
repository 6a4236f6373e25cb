//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod damage_repository;
pub mod insurance_repository;
pub mod payment_repository;
pub mod refund_repository;
pub mod repository_provider;
pub mod reservation_repository;
pub mod user_repository;
pub mod vehicle_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use std::str::FromStr;

use sea_orm::{DbErr, SqlErr};

use crate::domain::{DomainError, DomainResult};

// ── Shared conversion helpers ───────────────────────────────────

/// Parse a stored enum column. Stored values are written by this crate, so a
/// mismatch is a storage fault rather than bad input.
pub(crate) fn decode<T>(column: &str, value: &str) -> DomainResult<T>
where
    T: FromStr<Err = DomainError>,
{
    value
        .parse()
        .map_err(|_| DomainError::Storage(format!("Unexpected {} value '{}'", column, value)))
}

pub(crate) fn is_unique_violation(e: &DbErr) -> bool {
    matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
        || e.to_string().contains("UNIQUE")
}
