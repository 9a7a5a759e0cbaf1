//! PostgreSQL connection settings.
//!
//! - `DATABASE_URL`: connection string (required)
//! - `DATABASE_MAX_CONNECTIONS`: pool size (default: 5)

use std::env;

use crate::ConfigError;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

fn pool_size(n: i64) -> Result<u32, ConfigError> {
    u32::try_from(n).map_err(|_| ConfigError::Invalid {
        var: "DATABASE_MAX_CONNECTIONS",
        value: n.to_string(),
    })
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
        let max_connections = match crate::parse_positive("DATABASE_MAX_CONNECTIONS")? {
            Some(n) => pool_size(n)?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            url,
            max_connections,
        })
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"<redacted>")
            .field("max_connections", &self.max_connections)
            .finish()
    }
}
