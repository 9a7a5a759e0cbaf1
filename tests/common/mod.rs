use std::sync::Arc;

use accounts::accounts_auth::Subject;
use accounts::accounts_config::{CorsConfig, JwtConfig, ServerConfig};
use accounts::accounts_db::{InMemoryUserRepository, UserRepository};
use accounts::accounts_models::{NewUser, User};
use accounts::router::init_router;
use accounts::state::AppState;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

// Low bcrypt cost keeps fixtures fast; verification works with any cost.
const FIXTURE_BCRYPT_COST: u32 = 4;

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub repo: Arc<InMemoryUserRepository>,
}

#[allow(dead_code)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
}

impl TestUser {
    /// A fresh access token for this user.
    pub fn access_token(&self, app: &TestApp) -> String {
        app.state
            .tokens
            .issue_access_token(&Subject::new(self.id, &self.email))
            .unwrap()
    }

    #[allow(dead_code)]
    pub fn refresh_token(&self, app: &TestApp) -> String {
        app.state
            .tokens
            .issue_refresh_token(&Subject::new(self.id, &self.email))
            .unwrap()
    }
}

pub fn setup_test_app() -> TestApp {
    let repo = Arc::new(InMemoryUserRepository::new());
    let state = AppState::new(
        JwtConfig::new("integration-test-secret-at-least-32-chars"),
        CorsConfig::default(),
        ServerConfig::default(),
        repo.clone(),
    );

    TestApp {
        router: init_router(state.clone(), None),
        state,
        repo,
    }
}

pub fn generate_unique_email() -> String {
    let email: String = SafeEmail().fake();
    format!("{}-{}", Uuid::new_v4().simple(), email)
}

async fn insert_user(app: &TestApp, new_user: NewUser, password: &str) -> TestUser {
    let user = app.repo.create_user(new_user).await.unwrap();
    TestUser {
        id: user.id,
        email: user.email,
        password: password.to_string(),
    }
}

pub async fn create_test_user(app: &TestApp) -> TestUser {
    let password = "testpass123";
    let hash = bcrypt::hash(password, FIXTURE_BCRYPT_COST).unwrap();
    insert_user(app, NewUser::regular(generate_unique_email(), hash), password).await
}

#[allow(dead_code)]
pub async fn create_test_superuser(app: &TestApp) -> TestUser {
    let password = "adminpass123";
    let hash = bcrypt::hash(password, FIXTURE_BCRYPT_COST).unwrap();
    insert_user(app, NewUser::superuser(generate_unique_email(), hash), password).await
}

#[allow(dead_code)]
pub async fn deactivate(app: &TestApp, id: Uuid) -> User {
    let mut user = app.repo.find_user_by_id(id).await.unwrap().unwrap();
    user.is_active = false;
    app.repo.update_user(&user).await.unwrap()
}

/// Sends one request through the router and returns the status and JSON body
/// (`Value::Null` for an empty or non-JSON body).
pub async fn send(
    app: &TestApp,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, body)
}
