//! User domain entity

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::shared::{DomainError, DomainResult};

/// Role discriminant carried by every user record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Client,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Client => "client",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "client" => Ok(Self::Client),
            other => Err(DomainError::Validation(format!(
                "Invalid role '{}'. Must be one of: admin, client",
                other
            ))),
        }
    }
}

/// Role-specific payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserProfile {
    Admin { permissions: Option<String> },
    Client { driving_license: Option<String> },
}

impl UserProfile {
    pub fn role(&self) -> Role {
        match self {
            Self::Admin { .. } => Role::Admin,
            Self::Client { .. } => Role::Client,
        }
    }
}

/// Registered user
#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub profile: UserProfile,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn role(&self) -> Role {
        self.profile.role()
    }

    pub fn auth_context(&self) -> AuthContext {
        AuthContext {
            user_id: self.id,
            role: self.role(),
        }
    }
}

/// User to be inserted (password already hashed)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub profile: UserProfile,
}

/// Authenticated caller, passed explicitly into every service operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: i32,
    pub role: Role,
}

impl AuthContext {
    pub fn new(user_id: i32, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn client(user_id: i32) -> Self {
        Self::new(user_id, Role::Client)
    }

    pub fn admin(user_id: i32) -> Self {
        Self::new(user_id, Role::Admin)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn require_admin(&self) -> DomainResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(DomainError::Forbidden("Admin access required".into()))
        }
    }

    /// Owners see their own records, admins see everything.
    pub fn can_access(&self, owner_id: i32) -> bool {
        self.is_admin() || self.user_id == owner_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_follows_profile_variant() {
        let admin = UserProfile::Admin { permissions: Some("all".into()) };
        let client = UserProfile::Client { driving_license: None };
        assert_eq!(admin.role(), Role::Admin);
        assert_eq!(client.role(), Role::Client);
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(matches!("owner".parse::<Role>(), Err(DomainError::Validation(_))));
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
    }

    #[test]
    fn access_checks_dispatch_on_role() {
        let client = AuthContext::client(7);
        assert!(client.can_access(7));
        assert!(!client.can_access(8));
        assert!(matches!(client.require_admin(), Err(DomainError::Forbidden(_))));

        let admin = AuthContext::admin(1);
        assert!(admin.can_access(8));
        assert!(admin.require_admin().is_ok());
    }
}
