pub mod model;
pub mod repository;

pub use model::{Insurance, InsuranceKind, NewInsurance};
pub use repository::InsuranceRepository;
