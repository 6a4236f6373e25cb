use async_trait::async_trait;

use super::model::{Insurance, NewInsurance};
use crate::domain::DomainResult;

#[async_trait]
pub trait InsuranceRepository: Send + Sync {
    /// `NotFound` when the vehicle does not exist
    async fn save(&self, insurance: NewInsurance) -> DomainResult<Insurance>;

    async fn find_for_vehicle(&self, vehicle_id: i32) -> DomainResult<Vec<Insurance>>;
}
