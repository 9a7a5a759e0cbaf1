//! Application error types.
//!
//! Two layers:
//!
//! - [`AuthError`]: the typed failure kinds produced by token validation, the
//!   permission guard and the user store. Library code matches on these.
//! - [`AppError`]: the single HTTP-facing error. Every [`AuthError`] converts into
//!   an [`AppError`] carrying the matching status code, and the original kind can
//!   be recovered with [`AppError::auth_error`].

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Authentication and authorization failure kinds.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    TokenInvalid,

    #[error("Scope for the token is invalid: expected {expected}, found {found}")]
    ScopeMismatch { expected: String, found: String },

    #[error("Not authenticated: {0}")]
    Unauthenticated(String),

    #[error("Inactive user")]
    InactiveUser,

    #[error("Access denied by policy '{0}'")]
    Forbidden(String),

    #[error("User not found")]
    UserNotFound,

    #[error("User with same email already exists")]
    DuplicateEmail,

    #[error("Failed to encode token: {0}")]
    TokenEncoding(String),
}

impl AuthError {
    /// HTTP status the kind is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::TokenExpired
            | AuthError::TokenInvalid
            | AuthError::ScopeMismatch { .. }
            | AuthError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AuthError::InactiveUser | AuthError::DuplicateEmail => StatusCode::BAD_REQUEST,
            AuthError::Forbidden(_) => StatusCode::FORBIDDEN,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::TokenEncoding(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// True for the kinds produced by token validation.
    pub fn is_token_error(&self) -> bool {
        matches!(
            self,
            AuthError::TokenExpired | AuthError::TokenInvalid | AuthError::ScopeMismatch { .. }
        )
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        AuthError::Unauthenticated(message.into()).into()
    }

    pub fn forbidden(policy: impl Into<String>) -> Self {
        AuthError::Forbidden(policy.into()).into()
    }

    pub fn database<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    /// The typed auth failure behind this error, if there is one.
    pub fn auth_error(&self) -> Option<&AuthError> {
        self.error.downcast_ref::<AuthError>()
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        Self::new(err.status(), err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<AuthError>() {
            Ok(auth) => auth.into(),
            Err(other) => AppError::internal(other),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, error = ?self.error, "Request failed");
        }

        let body = Json(json!({
            "error": self.error.to_string()
        }));

        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_errors_map_to_unauthorized() {
        for err in [
            AuthError::TokenExpired,
            AuthError::TokenInvalid,
            AuthError::ScopeMismatch {
                expected: "access_token".into(),
                found: "refresh_token".into(),
            },
            AuthError::Unauthenticated("Invalid password".into()),
        ] {
            assert_eq!(AppError::from(err).status, StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(AuthError::InactiveUser.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::DuplicateEmail.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::UserNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AuthError::Forbidden("is_superuser".into()).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AuthError::TokenEncoding("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_auth_error_survives_conversion() {
        let err: AppError = AuthError::UserNotFound.into();
        assert_eq!(err.auth_error(), Some(&AuthError::UserNotFound));

        let wrapped: AppError = anyhow::Error::new(AuthError::DuplicateEmail).into();
        assert_eq!(wrapped.status, StatusCode::BAD_REQUEST);
        assert_eq!(wrapped.auth_error(), Some(&AuthError::DuplicateEmail));
    }

    #[test]
    fn test_plain_anyhow_is_internal() {
        let err: AppError = anyhow::anyhow!("connection reset").into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.auth_error().is_none());
    }

    #[test]
    fn test_is_token_error() {
        assert!(AuthError::TokenExpired.is_token_error());
        assert!(!AuthError::InactiveUser.is_token_error());
    }
}
