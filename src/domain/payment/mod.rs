pub mod model;
pub mod repository;

pub use model::{Payment, PaymentMethod, PaymentStatus, PaymentSummary};
pub use repository::PaymentRepository;
