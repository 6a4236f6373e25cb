pub mod auth;
pub mod damage;
pub mod health;
pub mod metrics;
pub mod payments;
pub mod refunds;
pub mod request_id;
pub mod reservations;
pub mod stats;
pub mod users;
pub mod vehicles;
