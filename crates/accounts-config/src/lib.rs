//! # Accounts Config
//!
//! Configuration types for the accounts service, loaded once at startup from
//! environment variables and then passed around by value:
//!
//! - [`jwt`]: token signing secret and lifetimes
//! - [`cors`]: allowed CORS origins
//! - [`server`]: bind address and metrics toggle
//! - [`database`]: PostgreSQL connection settings
//!
//! # Example
//!
//! ```ignore
//! use accounts_config::AppConfig;
//!
//! dotenvy::dotenv().ok();
//! let config = AppConfig::from_env()?;
//! let tokens = TokenService::new(config.jwt.clone());
//! ```

use std::env;

use thiserror::Error;

pub mod cors;
pub mod database;
pub mod jwt;
pub mod server;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has an invalid value: '{value}'")]
    Invalid { var: &'static str, value: String },
}

/// Everything the HTTP service needs, read once at startup.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub jwt: JwtConfig,
    pub cors: CorsConfig,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            jwt: JwtConfig::from_env()?,
            cors: CorsConfig::from_env(),
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
        })
    }
}

/// Reads an optional positive integer variable.
fn parse_positive(var: &'static str) -> Result<Option<i64>, ConfigError> {
    match env::var(var) {
        Ok(value) => match value.trim().parse::<i64>() {
            Ok(n) if n > 0 => Ok(Some(n)),
            _ => Err(ConfigError::Invalid { var, value }),
        },
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_variable_is_none() {
        assert_eq!(
            parse_positive("ACCOUNTS_CONFIG_TEST_SURELY_UNSET_VARIABLE"),
            Ok(None)
        );
    }

    #[test]
    fn test_config_error_messages() {
        assert_eq!(
            ConfigError::Missing("DATABASE_URL").to_string(),
            "DATABASE_URL must be set"
        );
        assert_eq!(
            ConfigError::Invalid {
                var: "PORT",
                value: "abc".into()
            }
            .to_string(),
            "PORT has an invalid value: 'abc'"
        );
    }
}
