use anyhow::{Result, anyhow, bail};
use validator::ValidateEmail;

use accounts_core::{AuthError, check_password_policy, hash_password};
use accounts_db::UserRepository;
use accounts_models::{NewUser, User};

/// Creates a verified, active superuser.
///
/// Refuses when a superuser already exists unless `force` is set, and never
/// reuses an existing email.
pub async fn create_superuser(
    repo: &dyn UserRepository,
    email: &str,
    password: &str,
    force: bool,
) -> Result<User> {
    let email = email.trim();
    if !email.validate_email() {
        bail!("'{}' is not a valid email address", email);
    }
    check_password_policy(password, email).map_err(|msg| anyhow!(msg))?;

    if !force
        && let Some(existing) = repo.find_superuser().await.map_err(|e| e.error)?
    {
        bail!(
            "A superuser already exists ({}). Pass --force to create another",
            existing.email
        );
    }

    let hash = hash_password(password).map_err(|e| e.error)?;
    repo.create_user(NewUser::superuser(email, hash))
        .await
        .map_err(|e| {
            if matches!(e.auth_error(), Some(AuthError::DuplicateEmail)) {
                anyhow!("A user with email {} already exists", email)
            } else {
                e.error
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use accounts_core::verify_password;
    use accounts_db::InMemoryUserRepository;

    #[tokio::test]
    async fn test_create_superuser() {
        let repo = InMemoryUserRepository::new();
        let admin = create_superuser(&repo, "root@example.com", "correct-horse", false)
            .await
            .unwrap();

        assert!(admin.is_superuser);
        assert!(admin.is_active);
        assert!(admin.is_verified);
        assert!(verify_password("correct-horse", &admin.password).unwrap());
    }

    #[tokio::test]
    async fn test_second_superuser_needs_force() {
        let repo = InMemoryUserRepository::new();
        create_superuser(&repo, "root@example.com", "correct-horse", false)
            .await
            .unwrap();

        let err = create_superuser(&repo, "second@example.com", "correct-horse", false)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("--force"));

        assert!(
            create_superuser(&repo, "second@example.com", "correct-horse", true)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_rejects_bad_input() {
        let repo = InMemoryUserRepository::new();
        assert!(create_superuser(&repo, "not-an-email", "correct-horse", false).await.is_err());
        assert!(create_superuser(&repo, "root@example.com", "short", false).await.is_err());
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_duplicate_email_with_force() {
        let repo = InMemoryUserRepository::new();
        create_superuser(&repo, "root@example.com", "correct-horse", false)
            .await
            .unwrap();

        let err = create_superuser(&repo, "root@example.com", "correct-horse", true)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }
}
