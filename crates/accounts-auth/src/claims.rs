//! JWT claim structures for authentication tokens.
//!
//! Every token the service signs carries the same claim set:
//!
//! - `exp`: expiry, unix seconds
//! - `iat`: issued-at, unix seconds
//! - `scope`: [`Scope`], `"access_token"` or `"refresh_token"` on the wire
//! - `sub`: [`Subject`], the user the token was issued for

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::policy::Identity;

/// What a token may be redeemed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Scope {
    #[serde(rename = "access_token")]
    Access,
    #[serde(rename = "refresh_token")]
    Refresh,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Access => "access_token",
            Scope::Refresh => "refresh_token",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The identity embedded in a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Subject {
    pub user_id: Uuid,
    /// The user's email, which doubles as the login handle.
    pub username: String,
}

impl Subject {
    pub fn new(user_id: Uuid, username: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
        }
    }

    pub fn of<I: Identity + ?Sized>(identity: &I) -> Self {
        Self::new(identity.id(), identity.email())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Token expiration timestamp (Unix timestamp)
    pub exp: i64,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: i64,
    pub scope: Scope,
    pub sub: Subject,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_wire_names() {
        assert_eq!(
            serde_json::to_string(&Scope::Access).unwrap(),
            r#""access_token""#
        );
        assert_eq!(
            serde_json::to_string(&Scope::Refresh).unwrap(),
            r#""refresh_token""#
        );
        assert_eq!(Scope::Refresh.to_string(), "refresh_token");
    }

    #[test]
    fn test_claims_serialize() {
        let user_id = Uuid::new_v4();
        let claims = Claims {
            exp: 1234567890,
            iat: 1234566090,
            scope: Scope::Access,
            sub: Subject::new(user_id, "test@example.com"),
        };
        let serialized = serde_json::to_string(&claims).unwrap();
        assert!(serialized.contains(r#""scope":"access_token""#));
        assert!(serialized.contains(r#""username":"test@example.com""#));
        assert!(serialized.contains(&format!(r#""user_id":"{}""#, user_id)));
    }

    #[test]
    fn test_claims_deserialize() {
        let json = r#"{"exp":9999999999,"iat":9999999900,"scope":"refresh_token","sub":{"user_id":"67e55044-10b1-426f-9247-bb680e5fe0c8","username":"user@test.com"}}"#;
        let claims: Claims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.scope, Scope::Refresh);
        assert_eq!(claims.sub.username, "user@test.com");
        assert_eq!(claims.exp, 9999999999);
    }

    #[test]
    fn test_unknown_scope_rejected() {
        let json = r#"{"exp":1,"iat":0,"scope":"admin","sub":{"user_id":"67e55044-10b1-426f-9247-bb680e5fe0c8","username":"a@b.c"}}"#;
        assert!(serde_json::from_str::<Claims>(json).is_err());
    }
}
