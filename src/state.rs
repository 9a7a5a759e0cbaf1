use std::sync::Arc;

use accounts_auth::TokenService;
use accounts_config::{AppConfig, CorsConfig, JwtConfig, ServerConfig};
use accounts_db::UserRepository;

use crate::middleware::guard::PermissionGuard;

/// Shared application state, built once at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub cors_config: CorsConfig,
    pub server_config: ServerConfig,
    pub tokens: TokenService,
    pub users: Arc<dyn UserRepository>,
}

impl AppState {
    pub fn new(
        jwt_config: JwtConfig,
        cors_config: CorsConfig,
        server_config: ServerConfig,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            cors_config,
            server_config,
            tokens: TokenService::new(jwt_config),
            users,
        }
    }

    pub fn from_config(config: &AppConfig, users: Arc<dyn UserRepository>) -> Self {
        Self::new(
            config.jwt.clone(),
            config.cors.clone(),
            config.server.clone(),
            users,
        )
    }

    pub fn guard(&self) -> PermissionGuard {
        PermissionGuard::new(self.tokens.clone(), self.users.clone())
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("cors_config", &self.cors_config)
            .field("server_config", &self.server_config)
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}
