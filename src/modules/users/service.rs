use anyhow::anyhow;
use tracing::{info, instrument};
use uuid::Uuid;

use accounts_core::{AppError, AuthError, ListParams, check_password_policy, hash_password};
use accounts_db::UserRepository;
use accounts_models::{CreateUserDto, NewUser, UpdateUserDto, User, UserCreated};

use crate::metrics::track_user_created;

pub struct UserService;

impl UserService {
    #[instrument(skip(users, dto), fields(email = %dto.email))]
    pub async fn create_user(
        users: &dyn UserRepository,
        dto: CreateUserDto,
    ) -> Result<UserCreated, AppError> {
        let hashed_password = hash_password(&dto.password)?;
        let user = users
            .create_user(NewUser::from_registration(dto, hashed_password))
            .await?;

        info!(user_id = %user.id, "User registered");
        track_user_created();

        Ok(UserCreated {
            id: user.id,
            email: user.email,
        })
    }

    #[instrument(skip(users))]
    pub async fn list_users(
        users: &dyn UserRepository,
        params: &ListParams,
    ) -> Result<Vec<User>, AppError> {
        users.list_users(params.skip(), params.limit()).await
    }

    #[instrument(skip(users))]
    pub async fn get_user(users: &dyn UserRepository, id: Uuid) -> Result<User, AppError> {
        users
            .find_user_by_id(id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }

    #[instrument(skip(users))]
    pub async fn get_user_by_email(
        users: &dyn UserRepository,
        email: &str,
    ) -> Result<User, AppError> {
        users
            .find_user_by_email(email)
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }

    /// Applies a partial update. Callers check who may set the flag fields.
    #[instrument(skip(users, dto))]
    pub async fn update_user(
        users: &dyn UserRepository,
        id: Uuid,
        dto: UpdateUserDto,
    ) -> Result<User, AppError> {
        let mut user = Self::get_user(users, id).await?;
        dto.apply_to(&mut user);

        if let Some(password) = &dto.password {
            check_password_policy(password, &user.email)
                .map_err(|msg| AppError::unprocessable(anyhow!(msg)))?;
            user.password = hash_password(password)?;
        }

        users.update_user(&user).await
    }

    #[instrument(skip(users))]
    pub async fn delete_user(users: &dyn UserRepository, id: Uuid) -> Result<(), AppError> {
        if !users.delete_user(id).await? {
            return Err(AuthError::UserNotFound.into());
        }

        info!(user_id = %id, "User deleted");
        Ok(())
    }
}
