//! User domain models and DTOs.

use accounts_auth::Identity;
use accounts_core::{MIN_PASSWORD_LENGTH, check_password_policy};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// A user account as stored in the `users` table.
///
/// The password hash is never serialized.
#[derive(Serialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: bool,
    pub is_verified: bool,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl Identity for User {
    fn id(&self) -> Uuid {
        self.id
    }

    fn email(&self) -> &str {
        &self.email
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn is_superuser(&self) -> bool {
        self.is_superuser
    }
}

/// Everything storage needs to insert a user. `id` and `created_at` are
/// assigned on insert.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: bool,
    pub is_verified: bool,
    pub is_superuser: bool,
}

impl NewUser {
    /// A regular, active, unverified account. Registration never grants superuser.
    pub fn regular(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password_hash: password_hash.into(),
            first_name: None,
            last_name: None,
            is_active: true,
            is_verified: false,
            is_superuser: false,
        }
    }

    pub fn superuser(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            is_verified: true,
            is_superuser: true,
            ..Self::regular(email, password_hash)
        }
    }

    pub fn from_registration(dto: CreateUserDto, password_hash: String) -> Self {
        Self {
            first_name: dto.first_name,
            last_name: dto.last_name,
            ..Self::regular(dto.email, password_hash)
        }
    }
}

// Too-short passwords are already reported by the field rule.
fn validate_registration_password(dto: &CreateUserDto) -> Result<(), ValidationError> {
    if dto.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Ok(());
    }
    check_password_policy(&dto.password, &dto.email)
        .map_err(|msg| ValidationError::new("password_policy").with_message(msg.into()))
}

/// Registration payload.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
#[validate(schema(function = "validate_registration_password", skip_on_field_errors = false))]
pub struct CreateUserDto {
    #[validate(email)]
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[validate(length(min = 8, message = "Password should be at least 8 characters"))]
    pub password: String,
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
}

/// Partial update of a user. Absent fields are left untouched.
///
/// `email` cannot be changed. The flag fields may only be set by a superuser.
#[derive(Deserialize, Debug, Clone, Default, Validate, ToSchema)]
pub struct UpdateUserDto {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    #[validate(length(min = 8, message = "Password should be at least 8 characters"))]
    pub password: Option<String>,
    pub is_active: Option<bool>,
    pub is_verified: Option<bool>,
    pub is_superuser: Option<bool>,
}

impl UpdateUserDto {
    /// True if the update touches a flag reserved for superusers.
    pub fn sets_privileged_fields(&self) -> bool {
        self.is_active.is_some() || self.is_verified.is_some() || self.is_superuser.is_some()
    }

    /// Applies every present field except the password, which the caller
    /// hashes first.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(first_name) = &self.first_name {
            user.first_name = Some(first_name.clone());
        }
        if let Some(last_name) = &self.last_name {
            user.last_name = Some(last_name.clone());
        }
        if let Some(is_active) = self.is_active {
            user.is_active = is_active;
        }
        if let Some(is_verified) = self.is_verified {
            user.is_verified = is_verified;
        }
        if let Some(is_superuser) = self.is_superuser {
            user.is_superuser = is_superuser;
        }
    }
}

/// Response to a successful registration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct UserCreated {
    pub id: Uuid,
    pub email: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct DetailResponse {
    #[schema(example = "No content")]
    pub detail: String,
}

impl DetailResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
