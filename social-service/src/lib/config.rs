use std::env;

use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Application configuration for social-service.
///
/// Read once at startup; everything derived from it is immutable afterwards.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
    pub google: Option<GoogleConfig>,
}

/// PostgreSQL database configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// HTTP server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    pub cors_allowed_origin: String,
}

/// JWT authentication configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
}

impl JwtConfig {
    pub fn token_lifetime(&self) -> Duration {
        Duration::hours(self.expiration_hours)
    }
}

/// Password hashing configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    pub cost: u32,
}

/// Google OAuth client configuration.
///
/// The federated login routes are only mounted when this section exists.
#[derive(Debug, Deserialize, Clone)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl Config {
    /// Load configuration from files with environment variable overrides.
    ///
    /// # Configuration Priority (highest to lowest)
    /// 1. Conventional flat variables (JWT_SECRET, DATABASE_URL, PORT)
    /// 2. Environment variables (JWT__SECRET, SERVER__HTTP_PORT, etc.)
    /// 3. Environment-specific config file (config/{environment}.toml)
    /// 4. Default config file (config/default.toml)
    /// 5. Built-in defaults
    ///
    /// # Errors
    /// Returns error if required configuration values are missing or invalid
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("database.max_connections", 5)?
            .set_default("server.http_port", 8000)?
            .set_default("server.cors_allowed_origin", "http://localhost:3000")?
            .set_default("jwt.expiration_hours", 1)?
            .set_default("password.cost", auth::PasswordHasher::DEFAULT_COST)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .set_override_option("jwt.secret", env::var("JWT_SECRET").ok())?
            .set_override_option("database.url", env::var("DATABASE_URL").ok())?
            .set_override_option("server.http_port", env::var("PORT").ok())?
            .build()?;

        configuration.try_deserialize()
    }
}
