//! # Fleet Rental
//!
//! Vehicle rental backend: fleet registry, reservation lifecycle with a
//! race-free availability check, pricing, payments, refunds and damage
//! reports.
//!
//! ## Architecture
//!
//! - **domain**: entities, closed enumerations, pure rules, repository traits
//! - **application**: one service per use-case family; every call takes the
//!   caller's `AuthContext` explicitly
//! - **infrastructure**: SeaORM entities, migrations and repositories, JWT and
//!   password hashing
//! - **interfaces**: axum REST binding
//! - **shared**: error taxonomy, keyed locks, clock, retry, shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use infrastructure::{init_database, DatabaseConfig, Migrator, SeaOrmRepositoryProvider};

pub use interfaces::http::create_api_router;
