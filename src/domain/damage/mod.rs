pub mod model;
pub mod repository;

pub use model::{DamageReport, DamageReportUpdate, DamageStatus, NewDamageReport};
pub use repository::DamageRepository;
