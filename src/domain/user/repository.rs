//! User repository interface

use async_trait::async_trait;

use super::model::{NewUser, User};
use crate::domain::DomainResult;
use crate::shared::{PaginatedResult, PaginationParams};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user; `Conflict` when the email is taken
    async fn save(&self, user: NewUser) -> DomainResult<User>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    async fn list(&self, page: PaginationParams) -> DomainResult<PaginatedResult<User>>;

    async fn count(&self) -> DomainResult<u64>;
}
