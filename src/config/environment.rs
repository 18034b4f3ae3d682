// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, deployment modes, and runtime configuration parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BeautyPro

//! Environment-based configuration management for production deployment

use crate::constants::{defaults, limits};
use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::path::PathBuf;
use tracing::{info, warn};

/// Environment type for security and other configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Deployed service
    Production,
    /// Test runs
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Path of the database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string, treating anything without a `sqlite:` prefix as a file path
    #[must_use]
    pub fn parse_url(s: &str) -> Self {
        let path_str = s.strip_prefix("sqlite:").unwrap_or(s);
        if path_str == ":memory:" {
            Self::Memory
        } else {
            Self::SQLite {
                path: PathBuf::from(path_str),
            }
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::parse_url(defaults::DATABASE_URL)
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Top-level server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP port
    pub http_port: u16,
    /// Bind address
    pub host: String,
    /// Deployment environment
    pub environment: Environment,
    /// Database settings
    pub database: DatabaseConfig,
    /// Credential settings
    pub auth: AuthConfig,
    /// Cross-origin settings
    pub cors: CorsConfig,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database location
    pub url: DatabaseUrl,
}

/// Authentication configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Shared HS256 secret; a random one is generated per process when unset
    pub jwt_secret: Option<String>,
    /// Token lifetime in hours
    pub jwt_expiry_hours: i64,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "[REDACTED]"))
            .field("jwt_expiry_hours", &self.jwt_expiry_hours)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

/// CORS configuration
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Allowed origins; `["*"]` allows any
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable does not parse or validation fails
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        // Load .env file if it exists
        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {}", e);
        }

        let http_port = env::var("HTTP_PORT")
            .or_else(|_| env::var("PORT"))
            .unwrap_or_else(|_| defaults::HTTP_PORT.to_string())
            .parse()
            .context("Invalid HTTP_PORT value")?;

        let config = Self {
            http_port,
            host: env_var_or("HOST", defaults::HOST),
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),
            database: DatabaseConfig {
                url: DatabaseUrl::parse_url(&env_var_or("DATABASE_URL", defaults::DATABASE_URL)),
            },
            auth: AuthConfig {
                jwt_secret: env::var("JWT_SECRET").ok().filter(|s| !s.is_empty()),
                jwt_expiry_hours: env_var_or(
                    "JWT_EXPIRY_HOURS",
                    &limits::JWT_EXPIRY_HOURS.to_string(),
                )
                .parse()
                .context("Invalid JWT_EXPIRY_HOURS value")?,
                bcrypt_cost: env_var_or("BCRYPT_COST", &bcrypt::DEFAULT_COST.to_string())
                    .parse()
                    .context("Invalid BCRYPT_COST value")?,
            },
            cors: CorsConfig {
                allowed_origins: parse_origins(&env_var_or(
                    "CORS_ORIGINS",
                    defaults::CORS_ORIGINS,
                )),
            },
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error for a zero port, a non-positive token lifetime, a bcrypt
    /// cost outside 4..=31, or a production deployment without `JWT_SECRET`
    pub fn validate(&self) -> Result<()> {
        if self.http_port == 0 {
            return Err(anyhow::anyhow!("HTTP_PORT must be greater than zero"));
        }

        if self.auth.jwt_expiry_hours <= 0 {
            return Err(anyhow::anyhow!("JWT_EXPIRY_HOURS must be positive"));
        }

        let cost_range = limits::MIN_BCRYPT_COST..=limits::MAX_BCRYPT_COST;
        if !cost_range.contains(&self.auth.bcrypt_cost) {
            return Err(anyhow::anyhow!(
                "BCRYPT_COST must be between {} and {}",
                limits::MIN_BCRYPT_COST,
                limits::MAX_BCRYPT_COST
            ));
        }

        if self.environment.is_production() && self.auth.jwt_secret.is_none() {
            return Err(anyhow::anyhow!(
                "JWT_SECRET must be set in production; generated secrets invalidate tokens on restart"
            ));
        }

        if self.auth.jwt_secret.is_none() {
            warn!("JWT_SECRET not set; a random secret will be generated for this process");
        }

        Ok(())
    }

    /// Resolve the signing secret, generating a random one when unset
    ///
    /// # Errors
    ///
    /// Returns an error if the system RNG fails
    pub fn jwt_secret_bytes(&self) -> Result<Vec<u8>> {
        match &self.auth.jwt_secret {
            Some(secret) => Ok(secret.as_bytes().to_vec()),
            None => Ok(crate::auth::generate_jwt_secret()?.to_vec()),
        }
    }

    /// Socket address string to bind
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "BeautyPro Server Configuration:\n\
             - Environment: {}\n\
             - Bind: {}\n\
             - Database: {}\n\
             - JWT Secret: {}\n\
             - Token Lifetime: {}h\n\
             - CORS Origins: {}",
            self.environment,
            self.bind_address(),
            self.database.url,
            if self.auth.jwt_secret.is_some() {
                "Configured"
            } else {
                "Generated"
            },
            self.auth.jwt_expiry_hours,
            self.cors.allowed_origins.join(", ")
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse comma-separated CORS origins
fn parse_origins(origins_str: &str) -> Vec<String> {
    if origins_str.trim() == "*" {
        vec!["*".to_owned()]
    } else {
        origins_str
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "HTTP_PORT",
        "PORT",
        "HOST",
        "ENVIRONMENT",
        "DATABASE_URL",
        "JWT_SECRET",
        "JWT_EXPIRY_HOURS",
        "BCRYPT_COST",
        "CORS_ORIGINS",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    fn sample_config() -> ServerConfig {
        ServerConfig {
            http_port: 8001,
            host: "127.0.0.1".into(),
            environment: Environment::Testing,
            database: DatabaseConfig {
                url: DatabaseUrl::Memory,
            },
            auth: AuthConfig {
                jwt_secret: Some("test-secret".into()),
                jwt_expiry_hours: 720,
                bcrypt_cost: limits::MIN_BCRYPT_COST,
            },
            cors: CorsConfig {
                allowed_origins: vec!["*".into()],
            },
        }
    }

    #[test]
    fn test_parse_origins() {
        assert_eq!(parse_origins("*"), vec!["*".to_owned()]);
        assert_eq!(
            parse_origins("https://a.example, https://b.example,"),
            vec!["https://a.example".to_owned(), "https://b.example".to_owned()]
        );
    }

    #[test]
    fn test_database_url_parsing() {
        assert!(DatabaseUrl::parse_url("sqlite::memory:").is_memory());
        let file = DatabaseUrl::parse_url("sqlite:./data/test.db");
        assert_eq!(file.to_connection_string(), "sqlite:./data/test.db");
        let bare = DatabaseUrl::parse_url("./other.db");
        assert_eq!(bare.to_connection_string(), "sqlite:./other.db");
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!(
            Environment::from_str_or_default("PROD"),
            Environment::Production
        );
        assert_eq!(
            Environment::from_str_or_default("whatever"),
            Environment::Development
        );
    }

    #[test]
    fn test_config_validation() {
        let mut config = sample_config();
        assert!(config.validate().is_ok());

        config.http_port = 0;
        assert!(config.validate().is_err());

        let mut config = sample_config();
        config.auth.jwt_expiry_hours = 0;
        assert!(config.validate().is_err());

        let mut config = sample_config();
        config.environment = Environment::Production;
        config.auth.jwt_secret = None;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bcrypt_cost_bounds() {
        let mut config = sample_config();
        for cost in [limits::MIN_BCRYPT_COST, bcrypt::DEFAULT_COST, limits::MAX_BCRYPT_COST] {
            config.auth.bcrypt_cost = cost;
            assert!(config.validate().is_ok(), "cost {cost}");
        }
        for cost in [limits::MIN_BCRYPT_COST - 1, limits::MAX_BCRYPT_COST + 1] {
            config.auth.bcrypt_cost = cost;
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("between 4 and 31"), "{err}");
        }
    }

    #[test]
    fn test_summary_omits_secret() {
        let config = sample_config();
        let summary = config.summary();
        assert!(!summary.contains("test-secret"));
        assert!(summary.contains("Configured"));
        assert!(!format!("{config:?}").contains("test-secret"));
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = ServerConfig::from_env().unwrap();
        assert_eq!(config.http_port, defaults::HTTP_PORT);
        assert_eq!(config.host, defaults::HOST);
        assert_eq!(config.auth.jwt_expiry_hours, limits::JWT_EXPIRY_HOURS);
        assert_eq!(config.cors.allowed_origins, vec!["*".to_owned()]);
        assert!(config.auth.jwt_secret.is_none());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        env::set_var("PORT", "9100");
        env::set_var("DATABASE_URL", "sqlite::memory:");
        env::set_var("JWT_SECRET", "from-env");
        env::set_var("JWT_EXPIRY_HOURS", "48");
        env::set_var("CORS_ORIGINS", "https://app.example");

        let config = ServerConfig::from_env().unwrap();
        assert_eq!(config.http_port, 9100);
        assert!(config.database.url.is_memory());
        assert_eq!(config.auth.jwt_secret.as_deref(), Some("from-env"));
        assert_eq!(config.auth.jwt_expiry_hours, 48);
        assert_eq!(config.cors.allowed_origins, vec!["https://app.example".to_owned()]);
        assert_eq!(config.jwt_secret_bytes().unwrap(), b"from-env".to_vec());

        env::set_var("HTTP_PORT", "not-a-port");
        assert!(ServerConfig::from_env().is_err());
        clear_env();
    }
}
