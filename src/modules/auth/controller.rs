use axum::{Json, extract::State};
use tracing::instrument;

use accounts_core::AppError;
use accounts_models::{LoginRequest, LoginResponse, RefreshResponse};

use super::service::AuthService;
use crate::docs::ErrorResponse;
use crate::middleware::auth::BearerToken;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Malformed body or inactive user", body = ErrorResponse),
        (status = 401, description = "Invalid password", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::login_user(state.users.as_ref(), &state.tokens, dto).await?;
    Ok(Json(response))
}

/// Exchange a refresh token (sent as the bearer) for a new access token
#[utoipa::path(
    get,
    path = "/api/auth/refresh_token",
    responses(
        (status = 200, description = "New access token", body = RefreshResponse),
        (status = 401, description = "Missing, expired, invalid or wrong-scope token", body = ErrorResponse),
        (status = 404, description = "User no longer exists", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn refresh_token(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Json<RefreshResponse>, AppError> {
    let response = AuthService::refresh_token(&state.tokens, &state.guard(), &token).await?;
    Ok(Json(response))
}
