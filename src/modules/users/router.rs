use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::auth::require_superuser;
use crate::modules::users::controller::{
    create_user, delete_user, get_me, get_user, get_user_by_email, list_users, update_user,
};
use crate::state::AppState;

/// Only `GET /` sits behind `require_superuser`. The layer is applied to that
/// method alone so unmatched methods on `/` still get a 405.
pub fn init_users_router(state: AppState) -> Router<AppState> {
    let list =
        get(list_users).route_layer(middleware::from_fn_with_state(state, require_superuser));

    Router::new()
        .route("/", list.merge(post(create_user)))
        .route("/me", get(get_me))
        .route("/email/{email}", get(get_user_by_email))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
}
