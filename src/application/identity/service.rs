//! User management service
//!
//! HTTP handlers should be thin wrappers that delegate to this service.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{
    AuthContext, DomainError, DomainResult, NewUser, RepositoryProvider, Role, User, UserProfile,
};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::PasswordHasher;
use crate::shared::{PaginatedResult, PaginationParams};

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

/// Registration request; the role decides which profile field is required
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub role: Role,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub driving_license: Option<String>,
    pub permissions: Option<String>,
}

impl Registration {
    fn profile(&self) -> DomainResult<UserProfile> {
        match self.role {
            Role::Client => match non_blank(&self.driving_license) {
                Some(license) => Ok(UserProfile::Client {
                    driving_license: Some(license),
                }),
                None => Err(DomainError::Validation(
                    "Driving license is required for clients".into(),
                )),
            },
            Role::Admin => match non_blank(&self.permissions) {
                Some(perms) => Ok(UserProfile::Admin {
                    permissions: Some(perms),
                }),
                None => Err(DomainError::Validation(
                    "Permissions are required for admins".into(),
                )),
            },
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Registration, login and user listing.
pub struct IdentityService {
    repos: Arc<dyn RepositoryProvider>,
    jwt_config: JwtConfig,
    hasher: PasswordHasher,
}

impl IdentityService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        jwt_config: JwtConfig,
        hasher: PasswordHasher,
    ) -> Self {
        Self {
            repos,
            jwt_config,
            hasher,
        }
    }

    pub fn jwt_config(&self) -> &JwtConfig {
        &self.jwt_config
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate by email + password and return a JWT.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResult> {
        let email = email.trim().to_lowercase();
        let Some(user) = self.repos.users().find_by_email(&email).await? else {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        };

        let valid = self
            .hasher
            .verify(password, &user.password_hash)
            .unwrap_or(false);
        if !valid {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        }

        let token = create_token(user.id, &user.email, user.role(), &self.jwt_config)
            .map_err(|e| DomainError::Storage(format!("Failed to create token: {}", e)))?;

        info!(user_id = user.id, role = %user.role(), "User logged in");
        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            user,
        })
    }

    // ── Registration ────────────────────────────────────────────

    /// Register a user. Clients may self-register; admin accounts can only
    /// be created by an authenticated admin.
    pub async fn register(
        &self,
        caller: Option<&AuthContext>,
        registration: Registration,
    ) -> DomainResult<User> {
        if registration.role == Role::Admin {
            match caller {
                Some(ctx) => ctx.require_admin()?,
                None => {
                    return Err(DomainError::Forbidden(
                        "Only administrators can create admin accounts".into(),
                    ))
                }
            }
        }

        let email = registration.email.trim().to_lowercase();
        if !email.contains('@') || email.len() < 3 {
            return Err(DomainError::Validation("Invalid email address".into()));
        }
        if registration.password.len() < 6 {
            return Err(DomainError::Validation(
                "Password must be at least 6 characters".into(),
            ));
        }
        let profile = registration.profile()?;

        if self.repos.users().find_by_email(&email).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "Email {} is already registered",
                email
            )));
        }

        let password_hash = self
            .hasher
            .hash(&registration.password)
            .map_err(|e| DomainError::Storage(format!("Failed to hash password: {}", e)))?;

        let user = self
            .repos
            .users()
            .save(NewUser {
                email,
                password_hash,
                first_name: registration.first_name,
                last_name: registration.last_name,
                phone: registration.phone,
                profile,
            })
            .await?;

        info!(user_id = user.id, role = %user.role(), "New user registered");
        Ok(user)
    }

    /// Create the configured admin account when the user table is empty.
    pub async fn ensure_bootstrap_admin(&self, email: &str, password: &str) -> DomainResult<bool> {
        if self.repos.users().count().await? > 0 {
            return Ok(false);
        }
        if password.len() < 6 {
            warn!("Bootstrap admin password is too short; skipping admin creation");
            return Ok(false);
        }

        let password_hash = self
            .hasher
            .hash(password)
            .map_err(|e| DomainError::Storage(format!("Failed to hash password: {}", e)))?;

        let user = self
            .repos
            .users()
            .save(NewUser {
                email: email.trim().to_lowercase(),
                password_hash,
                first_name: Some("Admin".into()),
                last_name: None,
                phone: None,
                profile: UserProfile::Admin {
                    permissions: Some("all".into()),
                },
            })
            .await?;

        info!(user_id = user.id, email = %user.email, "Bootstrap admin created");
        Ok(true)
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn current_user(&self, ctx: &AuthContext) -> DomainResult<User> {
        self.repos
            .users()
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", ctx.user_id))
    }

    pub async fn list_users(
        &self,
        ctx: &AuthContext,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<User>> {
        ctx.require_admin()?;
        self.repos.users().list(page).await
    }
}
