//! User administration

pub mod handlers;

pub use handlers::*;
