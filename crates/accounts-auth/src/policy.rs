//! Authorization policies.
//!
//! A [`Policy`] is evaluated against the current user and a [`Target`], the
//! resource being acted on. Evaluation is pure; resolving the current user from a
//! bearer token happens in the HTTP layer.
//!
//! | policy | allowed when |
//! |---|---|
//! | `is_superuser` | the user is a superuser |
//! | `is_owner` | the target id or email is the user's own |
//! | `is_superuser_or_is_owner` | either of the above |
//! | `is_authenticated` | always, once a user is resolved |

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use accounts_core::AuthError;

/// What a policy needs to know about a user.
pub trait Identity {
    fn id(&self) -> Uuid;
    fn email(&self) -> &str;
    fn is_active(&self) -> bool;
    fn is_superuser(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    IsSuperuser,
    IsOwner,
    IsSuperuserOrIsOwner,
    IsAuthenticated,
}

/// The owner of the resource a request acts on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Target {
    pub id: Option<Uuid>,
    pub email: Option<String>,
}

impl Target {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn by_id(id: Uuid) -> Self {
        Self {
            id: Some(id),
            email: None,
        }
    }

    pub fn by_email(email: impl Into<String>) -> Self {
        Self {
            id: None,
            email: Some(email.into()),
        }
    }

    pub fn is_owned_by<I: Identity + ?Sized>(&self, user: &I) -> bool {
        self.id == Some(user.id()) || self.email.as_deref() == Some(user.email())
    }
}

impl Policy {
    pub const ALL: [Policy; 4] = [
        Policy::IsSuperuser,
        Policy::IsOwner,
        Policy::IsSuperuserOrIsOwner,
        Policy::IsAuthenticated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Policy::IsSuperuser => "is_superuser",
            Policy::IsOwner => "is_owner",
            Policy::IsSuperuserOrIsOwner => "is_superuser_or_is_owner",
            Policy::IsAuthenticated => "is_authenticated",
        }
    }

    pub fn allows<I: Identity + ?Sized>(&self, user: &I, target: &Target) -> bool {
        match self {
            Policy::IsSuperuser => user.is_superuser(),
            Policy::IsOwner => target.is_owned_by(user),
            Policy::IsSuperuserOrIsOwner => user.is_superuser() || target.is_owned_by(user),
            Policy::IsAuthenticated => true,
        }
    }

    pub fn evaluate<I: Identity + ?Sized>(&self, user: &I, target: &Target) -> Result<(), AuthError> {
        if self.allows(user, target) {
            Ok(())
        } else {
            Err(AuthError::Forbidden(self.as_str().to_string()))
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Policy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Policy::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("Unknown policy: {}", s))
    }
}
