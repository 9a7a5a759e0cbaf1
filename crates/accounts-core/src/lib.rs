//! # Accounts Core
//!
//! Core types, errors, and utilities shared by the accounts service crates.
//!
//! - [`errors`]: [`AuthError`] failure kinds and the HTTP-facing [`AppError`]
//! - [`pagination`]: `skip`/`limit` list parameters
//! - [`password`]: bcrypt hashing, verification and the new-password policy
//!
//! # Example
//!
//! ```ignore
//! use accounts_core::{AppError, AuthError, hash_password, verify_password};
//!
//! let hash = hash_password("secure_password")?;
//! if !verify_password("secure_password", &hash)? {
//!     return Err(AuthError::Unauthenticated("Invalid password".into()).into());
//! }
//! ```

pub mod errors;
pub mod pagination;
pub mod password;

pub use errors::{AppError, AuthError};
pub use pagination::ListParams;
pub use password::{MIN_PASSWORD_LENGTH, check_password_policy, hash_password, verify_password};
