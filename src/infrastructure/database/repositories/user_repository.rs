//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::{decode, is_unique_violation};
use crate::domain::user::{NewUser, Role, User, UserProfile, UserRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::user;
use crate::shared::{PaginatedResult, PaginationParams};

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: user::Model) -> DomainResult<User> {
    let profile = match decode::<Role>("user role", &m.role)? {
        Role::Admin => UserProfile::Admin {
            permissions: m.permissions,
        },
        Role::Client => UserProfile::Client {
            driving_license: m.driving_license,
        },
    };

    Ok(User {
        id: m.id,
        email: m.email,
        password_hash: m.password_hash,
        first_name: m.first_name,
        last_name: m.last_name,
        phone: m.phone,
        profile,
        created_at: m.created_at,
    })
}

// ── UserRepository impl ─────────────────────────────────────────

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn save(&self, u: NewUser) -> DomainResult<User> {
        debug!("Saving user: {}", u.email);

        let (permissions, driving_license) = match &u.profile {
            UserProfile::Admin { permissions } => (permissions.clone(), None),
            UserProfile::Client { driving_license } => (None, driving_license.clone()),
        };

        let model = user::ActiveModel {
            id: NotSet,
            email: Set(u.email.clone()),
            password_hash: Set(u.password_hash),
            first_name: Set(u.first_name),
            last_name: Set(u.last_name),
            phone: Set(u.phone),
            role: Set(u.profile.role().as_str().to_string()),
            permissions: Set(permissions),
            driving_license: Set(driving_license),
            created_at: Set(Utc::now()),
        };

        let saved = model.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::Conflict(format!("Email {} is already registered", u.email))
            } else {
                e.into()
            }
        })?;

        model_to_domain(saved)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<User>> {
        user::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(model_to_domain)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?
            .map(model_to_domain)
            .transpose()
    }

    async fn list(&self, page: PaginationParams) -> DomainResult<PaginatedResult<User>> {
        let query = user::Entity::find().order_by_asc(user::Column::Id);

        let total = query.clone().count(&self.db).await?;

        let models = query
            .offset(page.offset())
            .limit(page.limit as u64)
            .all(&self.db)
            .await?;

        let items = models
            .into_iter()
            .map(model_to_domain)
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(PaginatedResult::new(items, total, page.page, page.limit))
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(user::Entity::find().count(&self.db).await?)
    }
}
