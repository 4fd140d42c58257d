//! Runtime configuration, sourced from the environment.

use std::env;
use std::str::FromStr;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_JWT_EXPIRATION_HOURS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    MIN_JWT_SECRET_LENGTH,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
}

// Secrets never reach log output, even at debug level
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}

fn env_or(key: &str, fallback: &str) -> String {
    env::var(key).unwrap_or_else(|_| fallback.to_string())
}

fn env_parse<T: FromStr>(key: &str, fallback: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(fallback)
}

/// Resolve the JWT secret.
///
/// A release build refuses to start without one; a debug build falls
/// back to a fixed development secret so local runs need no setup.
fn load_jwt_secret() -> String {
    let secret = match env::var("JWT_SECRET") {
        Ok(secret) => secret,
        Err(_) if cfg!(debug_assertions) => {
            tracing::warn!("JWT_SECRET not set, using insecure default for development");
            "dev-secret-key-minimum-32-chars!!".to_string()
        }
        Err(_) => panic!("JWT_SECRET environment variable must be set in production"),
    };

    assert!(
        secret.len() >= MIN_JWT_SECRET_LENGTH,
        "JWT_SECRET must be at least {} characters long",
        MIN_JWT_SECRET_LENGTH
    );

    secret
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if JWT_SECRET is missing in a release build or too short.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            jwt_secret: load_jwt_secret(),
            jwt_expiration_hours: env_parse("JWT_EXPIRATION_HOURS", DEFAULT_JWT_EXPIRATION_HOURS),
            server_host: env_or("SERVER_HOST", DEFAULT_SERVER_HOST),
            server_port: env_parse("SERVER_PORT", DEFAULT_SERVER_PORT),
        }
    }

    /// Key material for token signing and verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Bind address in `host:port` form.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
