//! Configuration module for Portfolio Core.
//!
//! Loads configuration from YAML files and environment variables.

use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;

use crate::auth::ConfiguredUser;
use crate::error::{PortfolioError, PortfolioResult};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
}

/// Admin authentication configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// When false the admin API accepts anonymous viewers.
    pub enabled: bool,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub token_duration_hours: i64,
    /// Admin users allowed to log in.
    #[serde(default)]
    pub users: Vec<ConfiguredUser>,
}

/// Object storage configuration for uploaded media.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory uploaded objects are written under, one subdirectory per bucket.
    pub root: String,
    /// Base URL that public object URLs are built from.
    pub public_base_url: String,
}

impl Config {
    /// Load configuration from files and environment.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (PORTFOLIO__*)
    /// 2. config/local.yaml (if exists)
    /// 3. config/default.yaml (if exists)
    /// 4. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let config = ConfigLoader::builder()
            // Start with default config
            .add_source(File::with_name("config/default").required(false))
            // Layer on local overrides
            .add_source(File::with_name("config/local").required(false))
            // Layer on environment variables with PORTFOLIO prefix
            .add_source(
                Environment::with_prefix("PORTFOLIO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Reject settings the server cannot run with.
    pub fn validate(&self) -> PortfolioResult<()> {
        if self.auth.enabled {
            if self.auth.jwt_secret.len() < 16 {
                return Err(PortfolioError::Config(
                    "auth.jwt_secret must be at least 16 characters".to_string(),
                ));
            }
            if self.auth.users.is_empty() {
                return Err(PortfolioError::Config(
                    "auth is enabled but no auth.users are configured".to_string(),
                ));
            }
        }
        if self.storage.root.trim().is_empty() {
            return Err(PortfolioError::Config("storage.root must not be empty".to_string()));
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://portfolio.db?mode=rwc".to_string(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            jwt_secret: "change-me-in-production".to_string(),
            jwt_issuer: "portfolio-core".to_string(),
            token_duration_hours: 24,
            users: Vec::new(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: "storage".to_string(),
            public_base_url: "http://localhost:8080/storage".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert!(!config.auth.enabled);
        assert!(config.auth.users.is_empty());
        assert!(config.database.url.starts_with("sqlite:"));
    }

    #[test]
    fn test_partial_sections_fall_back_to_defaults() {
        let config: Config = ConfigLoader::builder()
            .set_override("server.host", "127.0.0.1")
            .unwrap()
            .set_override("server.port", 3000)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.storage.root, "storage");
    }

    #[test]
    fn test_validate_auth_needs_users() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.auth.enabled = true;
        config.auth.jwt_secret = "a-long-enough-test-secret".to_string();
        assert!(matches!(config.validate(), Err(PortfolioError::Config(_))));
    }

    #[test]
    fn test_validate_short_secret() {
        let mut config = Config::default();
        config.auth.enabled = true;
        config.auth.jwt_secret = "short".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("jwt_secret"));
    }
}
