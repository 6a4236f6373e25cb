//! Identity module: user registration and authentication
//!
//! Contains the `IdentityService`, the collaborator that turns credentials
//! into the explicit `AuthContext` every other service takes.

pub mod service;

pub use service::{AuthResult, IdentityService, Registration};
