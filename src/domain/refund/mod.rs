pub mod model;
pub mod repository;

pub use model::{Refund, RefundDecision, RefundStatus};
pub use repository::RefundRepository;
