use std::sync::Arc;

use tracing::{debug, warn};

use accounts_auth::{Policy, Scope, Target, TokenService};
use accounts_core::{AppError, AuthError};
use accounts_db::UserRepository;
use accounts_models::User;

use crate::metrics::track_authz_denied;

/// Resolves bearer tokens to users and applies [`Policy`] checks.
#[derive(Clone)]
pub struct PermissionGuard {
    tokens: TokenService,
    users: Arc<dyn UserRepository>,
}

impl PermissionGuard {
    pub fn new(tokens: TokenService, users: Arc<dyn UserRepository>) -> Self {
        Self { tokens, users }
    }

    /// The active user an access token was issued for.
    ///
    /// Token failures are reported as `Unauthenticated` with the cause in the
    /// message. A deleted user gives `UserNotFound` and a disabled one
    /// `InactiveUser`.
    pub async fn current_user(&self, bearer: &str) -> Result<User, AppError> {
        let subject = self
            .tokens
            .validate(bearer, Scope::Access)
            .map_err(|e| {
                debug!(error = %e, "Rejected bearer token");
                AuthError::Unauthenticated(e.to_string())
            })?;

        let user = self
            .users
            .find_user_by_id(subject.user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !user.is_active {
            return Err(AuthError::InactiveUser.into());
        }

        Ok(user)
    }

    /// Resolves the user behind `bearer` and evaluates `policy` against `target`.
    pub async fn authorize(
        &self,
        policy: Policy,
        bearer: &str,
        target: &Target,
    ) -> Result<User, AppError> {
        let user = self.current_user(bearer).await?;
        self.check(policy, &user, target)?;
        Ok(user)
    }

    pub fn check(&self, policy: Policy, user: &User, target: &Target) -> Result<(), AppError> {
        policy.evaluate(user, target).map_err(|e| {
            warn!(user_id = %user.id, policy = %policy, "Access denied");
            track_authz_denied(policy.as_str());
            AppError::from(e)
        })
    }
}
