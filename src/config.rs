//! Configuration module
//!
//! Settings are read from a TOML file, by default
//! `~/.config/fleet-rental/config.toml`. Every section and every key is
//! optional; anything missing falls back to its default.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [database]
//! url = "sqlite://./fleet-rental.db?mode=rwc"
//!
//! [security]
//! jwt_secret = "change-me"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::infrastructure::crypto::JwtConfig;
use crate::infrastructure::DatabaseConfig;
use crate::shared::InfraError;

/// Environment variable overriding the configuration file path
pub const CONFIG_ENV: &str = "RENTAL_CONFIG";

const APP_DIR: &str = "fleet-rental";
const CONFIG_FILE: &str = "config.toml";

/// Default configuration file location
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(CONFIG_FILE)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        let defaults = DatabaseConfig::default();
        Self {
            url: defaults.url,
            max_connections: defaults.max_connections,
            acquire_timeout_secs: defaults.acquire_timeout.as_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `fleet_rental=debug,tower_http=info`
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        let defaults = JwtConfig::default();
        Self {
            jwt_secret: defaults.secret,
            jwt_expiration_hours: defaults.expiration_hours,
        }
    }
}

/// Administrator account created on first start
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub email: String,
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            email: "admin@fleet-rental.local".to_string(),
            password: "admin123".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    /// Longest wait for a vehicle or reservation lock before `Unavailable`
    pub lock_timeout_ms: u64,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            lock_timeout_ms: 5_000,
        }
    }
}

/// Root of the TOML configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
    pub admin: AdminConfig,
    pub booking: BookingConfig,
}

impl AppConfig {
    /// Load the configuration; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, InfraError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|e| {
            InfraError::Config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self, InfraError> {
        let config: Self = toml::from_str(raw)
            .map_err(|e| InfraError::Config(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<(), InfraError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                InfraError::Config(format!("Cannot create {}: {}", parent.display(), e))
            })?;
        }
        let raw = toml::to_string_pretty(self)
            .map_err(|e| InfraError::Config(format!("Cannot serialize configuration: {}", e)))?;
        std::fs::write(path, raw)
            .map_err(|e| InfraError::Config(format!("Cannot write {}: {}", path.display(), e)))
    }

    pub fn validate(&self) -> Result<(), InfraError> {
        if self.database.url.trim().is_empty() {
            return Err(InfraError::Config("database.url must not be empty".into()));
        }
        if self.database.max_connections == 0 {
            return Err(InfraError::Config(
                "database.max_connections must be at least 1".into(),
            ));
        }
        if self.security.jwt_secret.len() < 16 {
            return Err(InfraError::Config(
                "security.jwt_secret must be at least 16 characters".into(),
            ));
        }
        if self.security.jwt_expiration_hours <= 0 {
            return Err(InfraError::Config(
                "security.jwt_expiration_hours must be positive".into(),
            ));
        }
        if self.booking.lock_timeout_ms == 0 {
            return Err(InfraError::Config(
                "booking.lock_timeout_ms must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn database_config(&self) -> DatabaseConfig {
        if self.database.url.contains(":memory:") {
            return DatabaseConfig {
                url: self.database.url.clone(),
                ..DatabaseConfig::in_memory()
            };
        }
        DatabaseConfig {
            url: self.database.url.clone(),
            max_connections: self.database.max_connections,
            acquire_timeout: Duration::from_secs(self.database.acquire_timeout_secs),
            ..DatabaseConfig::default()
        }
    }

    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig::new(
            self.security.jwt_secret.clone(),
            self.security.jwt_expiration_hours,
        )
    }

    pub fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.booking.lock_timeout_ms)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.server.shutdown_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AppConfig::parse("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.booking.lock_timeout_ms, 5_000);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AppConfig::parse(
            r#"
            [server]
            port = 9090

            [booking]
            lock_timeout_ms = 250
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.lock_timeout(), Duration::from_millis(250));
    }

    #[test]
    fn short_jwt_secret_is_rejected() {
        let err = AppConfig::parse("[security]\njwt_secret = \"short\"").unwrap_err();
        assert!(matches!(err, InfraError::Config(_)));
    }

    #[test]
    fn malformed_toml_is_rejected() {
        assert!(AppConfig::parse("[server\nport = 1").is_err());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("fleet-rental-missing-config.toml");
        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir().join(format!("fleet-rental-{}", uuid::Uuid::new_v4()));
        let path = dir.join(CONFIG_FILE);

        let mut config = AppConfig::default();
        config.server.port = 7070;
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded.server.port, 7070);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn builds_database_config() {
        let mut config = AppConfig::default();
        config.database.url = "sqlite::memory:".into();
        config.database.acquire_timeout_secs = 3;

        let db = config.database_config();
        assert_eq!(db.url, "sqlite::memory:");
        assert_eq!(db.acquire_timeout, Duration::from_secs(3));
    }
}
