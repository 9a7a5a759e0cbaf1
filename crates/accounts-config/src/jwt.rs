//! Token signing configuration.
//!
//! # Environment Variables
//!
//! - `AUTH_SECRET_STRING` (or `JWT_SECRET`): HS256 signing secret
//! - `JWT_ACCESS_EXPIRY`: access token lifetime in seconds (default: 1800, 30 minutes)
//! - `JWT_REFRESH_EXPIRY`: refresh token lifetime in seconds (default: 36000, 10 hours)

use std::env;

use crate::ConfigError;

pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 30 * 60;
pub const DEFAULT_REFRESH_TOKEN_EXPIRY: i64 = 10 * 60 * 60;

#[derive(Clone, PartialEq, Eq)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry: i64,
    pub refresh_token_expiry: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            access_token_expiry: DEFAULT_ACCESS_TOKEN_EXPIRY,
            refresh_token_expiry: DEFAULT_REFRESH_TOKEN_EXPIRY,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = env::var("AUTH_SECRET_STRING")
            .or_else(|_| env::var("JWT_SECRET"))
            .map_err(|_| ConfigError::Missing("AUTH_SECRET_STRING"))?;

        if secret.trim().is_empty() {
            return Err(ConfigError::Invalid {
                var: "AUTH_SECRET_STRING",
                value: String::new(),
            });
        }

        Ok(Self {
            secret,
            access_token_expiry: crate::parse_positive("JWT_ACCESS_EXPIRY")?
                .unwrap_or(DEFAULT_ACCESS_TOKEN_EXPIRY),
            refresh_token_expiry: crate::parse_positive("JWT_REFRESH_EXPIRY")?
                .unwrap_or(DEFAULT_REFRESH_TOKEN_EXPIRY),
        })
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self::new("insecure-development-secret-change-me")
    }
}

// Keep the secret out of logs and `#[instrument]` output.
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ttls() {
        let config = JwtConfig::new("secret");
        assert_eq!(config.access_token_expiry, 1800);
        assert_eq!(config.refresh_token_expiry, 36000);
        assert!(config.refresh_token_expiry > config.access_token_expiry);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = JwtConfig::new("super-secret-value");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret-value"));
        assert!(debug.contains("<redacted>"));
    }
}
