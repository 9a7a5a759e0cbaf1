//! Authentication and authorization for HTTP handlers.
//!
//! # Modules
//!
//! - [`guard`]: [`PermissionGuard`](guard::PermissionGuard), which turns a bearer
//!   token into a [`User`](accounts_models::User) and evaluates policies
//! - [`auth`]: extractors and route-layer middleware built on the guard
//!
//! # Authentication Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. The guard validates the token with the access scope
//! 3. The user is loaded and must still be active
//! 4. A policy is evaluated against the user and the target resource
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::CurrentUser;
//!
//! async fn update_user(
//!     State(state): State<AppState>,
//!     CurrentUser(user): CurrentUser,
//!     Path(id): Path<Uuid>,
//! ) -> Result<Json<User>, AppError> {
//!     state.guard().check(Policy::IsSuperuserOrIsOwner, &user, &Target::by_id(id))?;
//!     // ...
//! }
//! ```

pub mod auth;
pub mod guard;
