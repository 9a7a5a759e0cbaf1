//! Process-local user storage.
//!
//! Mirrors the PostgreSQL backend closely enough for the HTTP tests: unique
//! emails, `created_at` ordering and partial column writes all behave the same.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use accounts_core::{AppError, AuthError};
use accounts_models::{NewUser, User};

use crate::repository::UserRepository;

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn list_users(&self, skip: i64, limit: i64) -> Result<Vec<User>, AppError> {
        let users = self.users.read().await;
        let mut all: Vec<&User> = users.values().collect();
        all.sort_by_key(|u| (u.created_at, u.id));

        Ok(all
            .into_iter()
            .skip(skip.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == new_user.email) {
            return Err(AuthError::DuplicateEmail.into());
        }

        // Keep creation order observable even when two inserts share a clock tick.
        let latest = users.values().map(|u| u.created_at).max();
        let mut created_at = Utc::now();
        if let Some(latest) = latest
            && created_at <= latest
        {
            created_at = latest + Duration::microseconds(1);
        }

        let user = User {
            id: Uuid::new_v4(),
            email: new_user.email,
            password: new_user.password_hash,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            is_active: new_user.is_active,
            is_verified: new_user.is_verified,
            is_superuser: new_user.is_superuser,
            created_at,
            last_login: None,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_user(&self, user: &User) -> Result<User, AppError> {
        let mut users = self.users.write().await;
        let stored = users.get_mut(&user.id).ok_or(AuthError::UserNotFound)?;

        stored.first_name = user.first_name.clone();
        stored.last_name = user.last_name.clone();
        stored.password = user.password.clone();
        stored.is_active = user.is_active;
        stored.is_verified = user.is_verified;
        stored.is_superuser = user.is_superuser;
        Ok(stored.clone())
    }

    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), AppError> {
        if let Some(user) = self.users.write().await.get_mut(&id) {
            user.last_login = Some(at);
        }
        Ok(())
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.users.write().await.remove(&id).is_some())
    }

    async fn find_superuser(&self) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .filter(|u| u.is_superuser)
            .min_by_key(|u| u.created_at)
            .cloned())
    }
}
