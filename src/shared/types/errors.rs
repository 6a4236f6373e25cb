use thiserror::Error;

use crate::domain::reservation::Reservation;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    /// The requested interval overlaps live reservations, or the vehicle is
    /// out of the bookable pool. `conflicts` may be empty in the latter case.
    #[error("Vehicle {vehicle_id} is not available: {reason}")]
    BookingConflict {
        vehicle_id: i32,
        reason: String,
        conflicts: Vec<Reservation>,
    },

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Temporarily unavailable: {0}")]
    Unavailable(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            field: "id",
            value: id.to_string(),
        }
    }

    /// Whether this error is transient (lock wait timeout, pool exhausted,
    /// database busy) and the operation may succeed if retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, DomainError::Unavailable(_))
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        use sea_orm::DbErr;

        match &e {
            DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => {
                DomainError::Unavailable(format!("Database error: {}", e))
            }
            _ if e.to_string().contains("database is locked") => {
                DomainError::Unavailable(format!("Database error: {}", e))
            }
            _ => DomainError::Storage(e.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Infra(#[from] InfraError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_unavailable_is_transient() {
        assert!(DomainError::Unavailable("lock".into()).is_transient());
        assert!(!DomainError::Conflict("dup".into()).is_transient());
        assert!(!DomainError::Storage("boom".into()).is_transient());
    }

    #[test]
    fn acquire_timeout_maps_to_unavailable() {
        let err: DomainError =
            sea_orm::DbErr::ConnectionAcquire(sea_orm::ConnAcquireErr::Timeout).into();
        assert!(err.is_transient());
    }

    #[test]
    fn locked_database_maps_to_unavailable() {
        let err: DomainError = sea_orm::DbErr::Custom("database is locked".into()).into();
        assert!(matches!(err, DomainError::Unavailable(_)));
    }
}
