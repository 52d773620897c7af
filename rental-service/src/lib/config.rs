use std::env;

use auth::Secret;
use auth::SecretError;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Database URL that selects the in-process store instead of PostgreSQL.
pub const MEMORY_DATABASE_URL: &str = "memory";

/// Longest accepted session lifetime (one year).
pub const MAX_EXPIRATION_HOURS: i64 = 365 * 24;

/// Application configuration for rental-service.
///
/// Loaded from configuration files with environment variable overrides.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub jwt: JwtConfig,
    pub uploads: UploadsConfig,
}

/// HTTP server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// PostgreSQL database configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn is_memory(&self) -> bool {
        self.url == MEMORY_DATABASE_URL
    }
}

/// Password hashing configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct SecurityConfig {
    /// Pepper mixed into every password hash.
    #[serde(default)]
    pub salt: String,
}

/// JWT authentication configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    #[serde(default)]
    pub secret: String,
    #[serde(default = "default_expiration_hours")]
    pub expiration_hours: i64,
}

/// Avatar upload configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct UploadsConfig {
    /// Directory files are written to.
    pub directory: String,
    /// URL prefix files are served under.
    pub public_path: String,
}

fn default_max_connections() -> u32 {
    5
}

fn default_expiration_hours() -> i64 {
    auth::DEFAULT_TOKEN_TTL_HOURS
}

impl Config {
    /// Load configuration from files with environment variable overrides.
    ///
    /// # Configuration Priority (highest to lowest)
    /// 1. Environment variables (SECURITY__SALT, JWT__SECRET, DATABASE__URL, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// # Errors
    /// Fails when a source cannot be parsed or a required secret is empty.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: SECURITY__SALT=... overrides security.salt
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.pepper().map_err(secret_error)?;
        self.signing_secret().map_err(secret_error)?;

        if !(1..=MAX_EXPIRATION_HOURS).contains(&self.jwt.expiration_hours) {
            return Err(ConfigError::Message(format!(
                "jwt.expiration_hours must be between 1 and {}, got {}",
                MAX_EXPIRATION_HOURS, self.jwt.expiration_hours
            )));
        }

        Ok(())
    }

    /// Password pepper.
    pub fn pepper(&self) -> Result<Secret, SecretError> {
        Secret::new("security.salt", self.security.salt.clone())
    }

    /// Key used to sign session tokens.
    pub fn signing_secret(&self) -> Result<Secret, SecretError> {
        Secret::new("jwt.secret", self.jwt.secret.clone())
    }

    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.jwt.expiration_hours)
    }
}

fn secret_error(err: SecretError) -> ConfigError {
    ConfigError::Message(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(salt: &str, secret: &str) -> Config {
        Config {
            server: ServerConfig { http_port: 4000 },
            database: DatabaseConfig {
                url: MEMORY_DATABASE_URL.to_string(),
                max_connections: 5,
            },
            security: SecurityConfig {
                salt: salt.to_string(),
            },
            jwt: JwtConfig {
                secret: secret.to_string(),
                expiration_hours: 168,
            },
            uploads: UploadsConfig {
                directory: "upload".to_string(),
                public_path: "/upload".to_string(),
            },
        }
    }

    #[test]
    fn test_empty_pepper_is_rejected() {
        assert!(config("", "signing").validate().is_err());
        assert!(config("   ", "signing").validate().is_err());
    }

    #[test]
    fn test_empty_jwt_secret_is_rejected() {
        assert!(config("pepper", "").validate().is_err());
    }

    #[test]
    fn test_valid_secrets_pass() {
        let config = config("pepper", "signing");
        assert!(config.validate().is_ok());
        assert!(config.database.is_memory());
        assert_eq!(config.token_ttl(), chrono::Duration::days(7));
    }

    #[test]
    fn test_expiration_hours_is_bounded() {
        let mut config = config("pepper", "signing");

        config.jwt.expiration_hours = 0;
        assert!(config.validate().is_err());

        config.jwt.expiration_hours = i64::MAX;
        assert!(config.validate().is_err());

        config.jwt.expiration_hours = MAX_EXPIRATION_HOURS;
        assert!(config.validate().is_ok());
        assert_eq!(config.token_ttl(), chrono::Duration::days(365));
    }

    #[test]
    fn test_load_takes_secrets_from_environment() {
        env::set_var("SECURITY__SALT", "env-pepper");
        env::set_var("JWT__SECRET", "env-signing-key");
        env::set_var("DATABASE__URL", MEMORY_DATABASE_URL);

        let loaded = Config::load();

        env::remove_var("SECURITY__SALT");
        env::remove_var("JWT__SECRET");
        env::remove_var("DATABASE__URL");

        let config = loaded.expect("environment overrides should satisfy validation");
        assert_eq!(config.security.salt, "env-pepper");
        assert_eq!(config.jwt.secret, "env-signing-key");
        assert!(config.database.is_memory());
    }
}
