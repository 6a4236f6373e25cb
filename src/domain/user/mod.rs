//! User aggregate
//!
//! Users are owned by the identity collaborator; the booking core only needs
//! their id, their role and, for registration/login, their credentials.

pub mod model;
pub mod repository;

pub use model::{AuthContext, NewUser, Role, User, UserProfile};
pub use repository::UserRepository;
