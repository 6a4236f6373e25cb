//! Authentication DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::{AuthResult, Registration};
use crate::domain::{DomainError, DomainResult, Role, User, UserProfile};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({"email": "admin@example.com", "password": "admin123"}))]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 254, message = "email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    /// Always `Bearer`
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
    pub user: UserDto,
}

impl From<AuthResult> for LoginResponse {
    fn from(result: AuthResult) -> Self {
        Self {
            token: result.token,
            token_type: result.token_type,
            expires_in: result.expires_in,
            user: result.user.into(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, max = 128, message = "password must be 6-128 characters"))]
    pub password: String,
    /// `client` (default) or `admin`
    #[serde(default)]
    pub user_type: Option<String>,
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
    #[validate(length(max = 32))]
    pub phone: Option<String>,
    #[validate(length(max = 64))]
    pub driving_license: Option<String>,
    pub permissions: Option<String>,
}

impl RegisterRequest {
    pub fn into_registration(self) -> DomainResult<Registration> {
        let role = match self.user_type.as_deref() {
            None => Role::Client,
            Some(kind) => kind.parse::<Role>().map_err(|_| {
                DomainError::Validation(format!(
                    "Invalid user_type '{}'. Must be one of: client, admin",
                    kind
                ))
            })?,
        };
        Ok(Registration {
            email: self.email,
            password: self.password,
            role,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            driving_license: self.driving_license,
            permissions: self.permissions,
        })
    }
}

/// Public view of a user; never carries the password hash
#[derive(Debug, Serialize, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    /// `client` or `admin`
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driving_license: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        let role = user.role().as_str().to_string();
        let (driving_license, permissions) = match user.profile {
            UserProfile::Client { driving_license } => (driving_license, None),
            UserProfile::Admin { permissions } => (None, permissions),
        };
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            phone: user.phone,
            role,
            driving_license,
            permissions,
            created_at: user.created_at,
        }
    }
}
