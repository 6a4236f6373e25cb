//! SeaORM implementation of InsuranceRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};

use super::decode;
use crate::domain::insurance::{Insurance, InsuranceRepository, NewInsurance};
use crate::domain::money::{from_cents, to_cents};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{insurance, vehicle};

pub struct SeaOrmInsuranceRepository {
    db: DatabaseConnection,
}

impl SeaOrmInsuranceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: insurance::Model) -> DomainResult<Insurance> {
    Ok(Insurance {
        id: m.id,
        vehicle_id: m.vehicle_id,
        provider: m.provider,
        kind: decode("insurance type", &m.kind)?,
        expiry_date: m.expiry_date,
        coverage_amount: from_cents(m.coverage_amount),
    })
}

#[async_trait]
impl InsuranceRepository for SeaOrmInsuranceRepository {
    async fn save(&self, i: NewInsurance) -> DomainResult<Insurance> {
        if vehicle::Entity::find_by_id(i.vehicle_id)
            .one(&self.db)
            .await?
            .is_none()
        {
            return Err(DomainError::not_found("Vehicle", i.vehicle_id));
        }

        let model = insurance::ActiveModel {
            id: NotSet,
            vehicle_id: Set(i.vehicle_id),
            provider: Set(i.provider),
            kind: Set(i.kind.as_str().to_string()),
            expiry_date: Set(i.expiry_date),
            coverage_amount: Set(to_cents(i.coverage_amount)?),
        };
        model_to_domain(model.insert(&self.db).await?)
    }

    async fn find_for_vehicle(&self, vehicle_id: i32) -> DomainResult<Vec<Insurance>> {
        insurance::Entity::find()
            .filter(insurance::Column::VehicleId.eq(vehicle_id))
            .order_by_asc(insurance::Column::ExpiryDate)
            .all(&self.db)
            .await?
            .into_iter()
            .map(model_to_domain)
            .collect()
    }
}
