use chrono::Utc;
use tracing::{info, instrument, warn};

use accounts_auth::{Scope, Subject, TokenService};
use accounts_core::{AppError, AuthError, verify_password};
use accounts_db::UserRepository;
use accounts_models::{LoginRequest, LoginResponse, RefreshResponse};

use crate::metrics::{track_login, track_token_issued};
use crate::middleware::guard::PermissionGuard;

pub struct AuthService;

impl AuthService {
    /// Checks credentials and issues an access/refresh token pair.
    ///
    /// Only `last_login` is written on success.
    #[instrument(skip(users, tokens, dto), fields(email = %dto.email))]
    pub async fn login_user(
        users: &dyn UserRepository,
        tokens: &TokenService,
        dto: LoginRequest,
    ) -> Result<LoginResponse, AppError> {
        let user = match users.find_user_by_email(&dto.email).await? {
            Some(user) => user,
            None => {
                warn!("Login attempt for unknown email");
                track_login("unknown_email");
                return Err(AuthError::UserNotFound.into());
            }
        };

        if !verify_password(&dto.password, &user.password)? {
            warn!(user_id = %user.id, "Login failed: invalid password");
            track_login("invalid_password");
            return Err(AppError::unauthorized("Invalid password"));
        }

        if !user.is_active {
            warn!(user_id = %user.id, "Login refused: inactive user");
            track_login("inactive");
            return Err(AuthError::InactiveUser.into());
        }

        let subject = Subject::of(&user);
        let access_token = tokens.issue_access_token(&subject)?;
        let refresh_token = tokens.issue_refresh_token(&subject)?;
        track_token_issued(Scope::Access.as_str());
        track_token_issued(Scope::Refresh.as_str());

        users.record_login(user.id, Utc::now()).await?;

        info!(user_id = %user.id, "Login successful");
        track_login("success");

        Ok(LoginResponse {
            access_token,
            refresh_token,
        })
    }

    /// Rotates a refresh token into a new access token for a user who still
    /// exists and is active.
    #[instrument(skip_all)]
    pub async fn refresh_token(
        tokens: &TokenService,
        guard: &PermissionGuard,
        refresh_token: &str,
    ) -> Result<RefreshResponse, AppError> {
        let new_access_token = tokens.rotate(refresh_token)?;
        let user = guard.current_user(&new_access_token).await?;
        track_token_issued(Scope::Access.as_str());

        info!(user_id = %user.id, "Access token refreshed");
        Ok(RefreshResponse { new_access_token })
    }
}
