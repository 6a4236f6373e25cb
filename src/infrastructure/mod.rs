//! Infrastructure layer - external concerns

pub mod crypto;
pub mod database;

pub use database::migrator::Migrator;
pub use database::repositories::SeaOrmRepositoryProvider;
pub use database::{init_database, DatabaseConfig};
