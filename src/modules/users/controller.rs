use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use accounts_auth::{Policy, Target};
use accounts_core::{AppError, ListParams};
use accounts_models::{CreateUserDto, DetailResponse, UpdateUserDto, User, UserCreated};

use crate::docs::ErrorResponse;
use crate::middleware::auth::CurrentUser;
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created successfully", body = UserCreated),
        (status = 400, description = "Malformed body or email already registered", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<UserCreated>), AppError> {
    let created = UserService::create_user(state.users.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// List users (superuser only)
#[utoipa::path(
    get,
    path = "/api/users",
    params(ListParams),
    responses(
        (status = 200, description = "Users ordered by creation time", body = Vec<User>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not a superuser", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<User>>, AppError> {
    let users = UserService::list_users(state.users.as_ref(), &params).await?;
    Ok(Json(users))
}

/// Current user profile
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "The authenticated user", body = User),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn get_me(CurrentUser(user): CurrentUser) -> Json<User> {
    Json(user)
}

/// Get a user by id (superuser or owner)
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Neither superuser nor owner", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, current))]
pub async fn get_user(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    state
        .guard()
        .check(Policy::IsSuperuserOrIsOwner, &current, &Target::by_id(id))?;

    let user = UserService::get_user(state.users.as_ref(), id).await?;
    Ok(Json(user))
}

/// Get a user by email (superuser or owner)
#[utoipa::path(
    get,
    path = "/api/users/email/{email}",
    params(("email" = String, Path, description = "User email")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Neither superuser nor owner", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, current))]
pub async fn get_user_by_email(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(email): Path<String>,
) -> Result<Json<User>, AppError> {
    state.guard().check(
        Policy::IsSuperuserOrIsOwner,
        &current,
        &Target::by_email(email.clone()),
    )?;

    let user = UserService::get_user_by_email(state.users.as_ref(), &email).await?;
    Ok(Json(user))
}

/// Update a user (superuser or owner; flags need superuser)
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not allowed to change this user or these fields", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, current, dto))]
pub async fn update_user(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateUserDto>,
) -> Result<Json<User>, AppError> {
    let guard = state.guard();
    guard.check(Policy::IsSuperuserOrIsOwner, &current, &Target::by_id(id))?;
    if dto.sets_privileged_fields() {
        guard.check(Policy::IsSuperuser, &current, &Target::by_id(id))?;
    }

    let user = UserService::update_user(state.users.as_ref(), id, dto).await?;
    Ok(Json(user))
}

/// Delete a user (superuser or owner)
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = DetailResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Neither superuser nor owner", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, current))]
pub async fn delete_user(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DetailResponse>, AppError> {
    state
        .guard()
        .check(Policy::IsSuperuserOrIsOwner, &current, &Target::by_id(id))?;

    UserService::delete_user(state.users.as_ref(), id).await?;
    Ok(Json(DetailResponse::new("No content")))
}
