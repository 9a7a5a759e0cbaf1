use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{login_user, refresh_token};
use crate::state::AppState;

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login_user))
        .route("/refresh_token", get(refresh_token))
}
