use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use accounts_core::AppError;
use accounts_models::{NewUser, User};

/// Storage operations for [`User`] records.
///
/// Email uniqueness is enforced here: [`create_user`](Self::create_user) fails
/// with `AuthError::DuplicateEmail` when the email is taken.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Users ordered by creation time, oldest first.
    async fn list_users(&self, skip: i64, limit: i64) -> Result<Vec<User>, AppError>;

    async fn create_user(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Saves the mutable columns of `user`. `id`, `email` and `created_at`
    /// are never written. Fails with `AuthError::UserNotFound` if the row is gone.
    async fn update_user(&self, user: &User) -> Result<User, AppError>;

    /// Writes `last_login` and nothing else.
    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), AppError>;

    /// Returns whether a row was deleted.
    async fn delete_user(&self, id: Uuid) -> Result<bool, AppError>;

    async fn find_superuser(&self) -> Result<Option<User>, AppError>;
}
