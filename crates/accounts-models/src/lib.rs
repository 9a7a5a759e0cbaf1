//! # Accounts Models
//!
//! Domain models and DTOs for the accounts service.
//!
//! # Modules
//!
//! - [`auth`]: login and token refresh payloads
//! - [`users`]: the [`User`] entity, its storage input and the CRUD DTOs
//!
//! # Example
//!
//! ```ignore
//! use accounts_models::{CreateUserDto, NewUser, User};
//!
//! dto.validate()?;
//! let user: User = repo.create_user(NewUser::from_registration(dto, hash)).await?;
//! ```

pub mod auth;
pub mod users;

pub use auth::{LoginRequest, LoginResponse, RefreshResponse};
pub use users::{CreateUserDto, DetailResponse, NewUser, UpdateUserDto, User, UserCreated};
