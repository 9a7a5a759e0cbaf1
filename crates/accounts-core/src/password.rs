//! Password hashing with bcrypt.

use anyhow::anyhow;
use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal(anyhow!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::internal(anyhow!("Failed to verify password: {}", e)))
}

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Rules applied to a new password before it is hashed.
///
/// Returns the first violated rule as a message.
pub fn check_password_policy(password: &str, email: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err("Password should be at least 8 characters".to_string());
    }
    if !email.is_empty() && password.to_lowercase().contains(&email.to_lowercase()) {
        return Err("Password should not contain e-mail".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("correct horse").unwrap();
        assert_ne!(hash, "correct horse");
        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("wrong horse", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("samepassword").unwrap();
        let b = hash_password("samepassword").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_verify_invalid_hash_errors() {
        assert!(verify_password("whatever", "not_a_bcrypt_hash").is_err());
    }

    #[test]
    fn test_password_policy() {
        assert!(check_password_policy("longenough", "a@b.com").is_ok());
        assert_eq!(
            check_password_policy("short", "a@b.com").unwrap_err(),
            "Password should be at least 8 characters"
        );
        assert_eq!(
            check_password_policy("xxJohn@Example.comxx", "john@example.com").unwrap_err(),
            "Password should not contain e-mail"
        );
    }
}
