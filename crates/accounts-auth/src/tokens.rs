//! Token issuance and validation.
//!
//! [`TokenService`] signs HS256 JWTs with the secret from [`JwtConfig`] and
//! checks them back. Validation runs in a fixed order:
//!
//! 1. the token must be a JWT whose claims parse, else [`AuthError::TokenInvalid`]
//! 2. `now >= exp` gives [`AuthError::TokenExpired`], whatever the signature
//! 3. the signature must verify, else [`AuthError::TokenInvalid`]
//! 4. the scope must be the expected one, else [`AuthError::ScopeMismatch`]
//!
//! Every operation has an `_at` twin taking the current instant, which is what
//! the plain versions call with `Utc::now()`.
//!
//! # Example
//!
//! ```ignore
//! use accounts_auth::{Scope, Subject, TokenService};
//!
//! let tokens = TokenService::new(config.jwt.clone());
//! let subject = Subject::new(user.id, &user.email);
//!
//! let access = tokens.issue_access_token(&subject)?;
//! let refresh = tokens.issue_refresh_token(&subject)?;
//!
//! assert_eq!(tokens.validate(&access, Scope::Access)?, subject);
//! let renewed = tokens.rotate(&refresh)?;
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use data_encoding::BASE64URL_NOPAD;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, crypto, decode_header, encode};

use accounts_config::JwtConfig;
use accounts_core::AuthError;

use crate::claims::{Claims, Scope, Subject};

#[derive(Clone)]
pub struct TokenService {
    inner: Arc<Keys>,
}

struct Keys {
    config: JwtConfig,
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            inner: Arc::new(Keys {
                config,
                encoding,
                decoding,
            }),
        }
    }

    pub fn config(&self) -> &JwtConfig {
        &self.inner.config
    }

    pub fn issue_access_token(&self, subject: &Subject) -> Result<String, AuthError> {
        self.issue_access_token_at(subject, Utc::now())
    }

    pub fn issue_access_token_at(
        &self,
        subject: &Subject,
        now: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        self.issue(subject, Scope::Access, self.inner.config.access_token_expiry, now)
    }

    pub fn issue_refresh_token(&self, subject: &Subject) -> Result<String, AuthError> {
        self.issue_refresh_token_at(subject, Utc::now())
    }

    pub fn issue_refresh_token_at(
        &self,
        subject: &Subject,
        now: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        self.issue(
            subject,
            Scope::Refresh,
            self.inner.config.refresh_token_expiry,
            now,
        )
    }

    /// Checks a token and returns the subject it was issued for.
    pub fn validate(&self, token: &str, expected: Scope) -> Result<Subject, AuthError> {
        self.validate_at(token, expected, Utc::now())
    }

    pub fn validate_at(
        &self,
        token: &str,
        expected: Scope,
        now: DateTime<Utc>,
    ) -> Result<Subject, AuthError> {
        let (message, signature, claims) = split_token(token)?;
        if now.timestamp() >= claims.exp {
            return Err(AuthError::TokenExpired);
        }

        self.verify_signature(message, signature)?;
        if claims.scope != expected {
            return Err(AuthError::ScopeMismatch {
                expected: expected.to_string(),
                found: claims.scope.to_string(),
            });
        }

        Ok(claims.sub)
    }

    /// Redeems a refresh token for a fresh access token with the same subject.
    pub fn rotate(&self, refresh_token: &str) -> Result<String, AuthError> {
        self.rotate_at(refresh_token, Utc::now())
    }

    pub fn rotate_at(&self, refresh_token: &str, now: DateTime<Utc>) -> Result<String, AuthError> {
        let subject = self.validate_at(refresh_token, Scope::Refresh, now)?;
        self.issue_access_token_at(&subject, now)
    }

    fn issue(
        &self,
        subject: &Subject,
        scope: Scope,
        ttl_seconds: i64,
        now: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let iat = now.timestamp();
        let exp = iat.checked_add(ttl_seconds).ok_or_else(|| {
            AuthError::TokenEncoding(format!("token lifetime of {ttl_seconds}s overflows"))
        })?;
        let claims = Claims {
            exp,
            iat,
            scope,
            sub: subject.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.inner.encoding)
            .map_err(|e| AuthError::TokenEncoding(e.to_string()))
    }

    fn verify_signature(&self, message: &str, signature: &str) -> Result<(), AuthError> {
        let key = &self.inner.decoding;
        match crypto::verify(signature, message.as_bytes(), key, Algorithm::HS256) {
            Ok(true) => Ok(()),
            _ => Err(AuthError::TokenInvalid),
        }
    }
}

/// Splits a compact JWT into its signed part, its signature and the parsed
/// claims. Nothing is verified here.
fn split_token(token: &str) -> Result<(&str, &str, Claims), AuthError> {
    let header = decode_header(token).map_err(|_| AuthError::TokenInvalid)?;
    if header.alg != Algorithm::HS256 {
        return Err(AuthError::TokenInvalid);
    }

    let (message, signature) = token.rsplit_once('.').ok_or(AuthError::TokenInvalid)?;
    let (_, payload) = message.split_once('.').ok_or(AuthError::TokenInvalid)?;

    let payload = BASE64URL_NOPAD
        .decode(payload.as_bytes())
        .map_err(|_| AuthError::TokenInvalid)?;
    let claims: Claims = serde_json::from_slice(&payload).map_err(|_| AuthError::TokenInvalid)?;

    Ok((message, signature, claims))
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("config", &self.inner.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    fn get_test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            access_token_expiry: 1800,
            refresh_token_expiry: 36000,
        }
    }

    fn subject() -> Subject {
        Subject::new(Uuid::new_v4(), "test@example.com")
    }

    #[test]
    fn test_access_token_round_trip() {
        let tokens = TokenService::new(get_test_jwt_config());
        let subject = subject();

        let token = tokens.issue_access_token(&subject).unwrap();
        assert_eq!(token.split('.').count(), 3);
        assert_eq!(tokens.validate(&token, Scope::Access).unwrap(), subject);
    }

    #[test]
    fn test_refresh_token_not_accepted_as_access() {
        let tokens = TokenService::new(get_test_jwt_config());
        let token = tokens.issue_refresh_token(&subject()).unwrap();

        let err = tokens.validate(&token, Scope::Access).unwrap_err();
        assert_eq!(
            err,
            AuthError::ScopeMismatch {
                expected: "access_token".into(),
                found: "refresh_token".into(),
            }
        );
    }

    #[test]
    fn test_expired_exactly_at_exp() {
        let tokens = TokenService::new(get_test_jwt_config());
        let now = Utc::now();
        let token = tokens.issue_access_token_at(&subject(), now).unwrap();

        let at_exp = now + Duration::seconds(1800);
        let just_before = now + Duration::seconds(1799);
        assert!(tokens.validate_at(&token, Scope::Access, just_before).is_ok());
        assert_eq!(
            tokens.validate_at(&token, Scope::Access, at_exp),
            Err(AuthError::TokenExpired)
        );
    }

    #[test]
    fn test_garbage_is_invalid() {
        let tokens = TokenService::new(get_test_jwt_config());
        for token in ["", "invalid-token", "a.b.c", "Bearer x.y.z"] {
            assert_eq!(
                tokens.validate(token, Scope::Access),
                Err(AuthError::TokenInvalid)
            );
        }
    }

    #[test]
    fn test_rotate_keeps_subject() {
        let tokens = TokenService::new(get_test_jwt_config());
        let subject = subject();
        let refresh = tokens.issue_refresh_token(&subject).unwrap();

        let access = tokens.rotate(&refresh).unwrap();
        assert_eq!(tokens.validate(&access, Scope::Access).unwrap(), subject);
    }

    #[test]
    fn test_rotate_rejects_access_token() {
        let tokens = TokenService::new(get_test_jwt_config());
        let access = tokens.issue_access_token(&subject()).unwrap();

        assert!(matches!(
            tokens.rotate(&access),
            Err(AuthError::ScopeMismatch { .. })
        ));
    }

    #[test]
    fn test_fresh_token_carries_subject_object() {
        let tokens = TokenService::new(get_test_jwt_config());
        let subject = subject();
        let token = tokens.issue_access_token(&subject).unwrap();

        let payload = token.split('.').nth(1).unwrap();
        let raw = BASE64URL_NOPAD.decode(payload.as_bytes()).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&raw).unwrap();
        assert_eq!(json["scope"], "access_token");
        assert_eq!(json["sub"]["username"], "test@example.com");
        assert_eq!(json["sub"]["user_id"], subject.user_id.to_string());

        assert_eq!(tokens.validate(&token, Scope::Access).unwrap(), subject);
        let rotated = tokens
            .rotate(&tokens.issue_refresh_token(&subject).unwrap())
            .unwrap();
        assert_eq!(tokens.validate(&rotated, Scope::Access).unwrap(), subject);
    }

    #[test]
    fn test_other_algorithm_is_invalid() {
        let tokens = TokenService::new(get_test_jwt_config());
        let token = tokens.issue_access_token(&subject()).unwrap();
        let header = BASE64URL_NOPAD.encode(br#"{"alg":"HS384","typ":"JWT"}"#);
        let (_, rest) = token.split_once('.').unwrap();

        assert_eq!(
            tokens.validate(&format!("{header}.{rest}"), Scope::Access),
            Err(AuthError::TokenInvalid)
        );
    }

    #[test]
    fn test_lifetime_overflow_is_encoding_error() {
        let mut config = get_test_jwt_config();
        config.access_token_expiry = i64::MAX;
        let tokens = TokenService::new(config);

        assert!(matches!(
            tokens.issue_access_token(&subject()),
            Err(AuthError::TokenEncoding(_))
        ));
    }

    #[test]
    fn test_refresh_outlives_access() {
        let tokens = TokenService::new(get_test_jwt_config());
        let now = Utc::now();
        let refresh = tokens.issue_refresh_token_at(&subject(), now).unwrap();

        let later = now + Duration::hours(9);
        assert!(tokens.validate_at(&refresh, Scope::Refresh, later).is_ok());
        assert_eq!(
            tokens.validate_at(&refresh, Scope::Refresh, now + Duration::hours(10)),
            Err(AuthError::TokenExpired)
        );
    }
}
