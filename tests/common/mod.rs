#![allow(dead_code)]

use std::sync::{Arc, LazyLock};

use auth_gateway::app::build_router;
use auth_gateway::config::{AuthConfig, HttpLimits};
use auth_gateway::repos::{Identity, InMemoryUserRepo};
use auth_gateway::services::auth::{EnabledSchemes, Password, password::hash_password};
use auth_gateway::state::AppState;
use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http_body_util::BodyExt;
use uuid::Uuid;

pub const PASSWORD: &str = "correct-password";
pub const SECRET: &str = "integration-test-secret";

// argon2 is slow in debug builds; hash once per test binary.
static PASSWORD_HASH: LazyLock<String> =
    LazyLock::new(|| hash_password(&Password::new(PASSWORD)).expect("hash password"));

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub repo: Arc<InMemoryUserRepo>,
    pub alice: Identity,
    pub admin: Identity,
    pub inactive: Identity,
}

fn user(email: &str, is_active: bool, is_admin: bool) -> Identity {
    Identity {
        id: Uuid::new_v4(),
        email: email.to_string(),
        is_active,
        is_admin,
        password_hash: PASSWORD_HASH.clone(),
    }
}

pub fn auth_config(schemes: EnabledSchemes) -> AuthConfig {
    AuthConfig::new(SECRET, schemes)
}

pub fn setup() -> TestApp {
    setup_with(EnabledSchemes::all())
}

pub fn setup_with(schemes: EnabledSchemes) -> TestApp {
    let repo = Arc::new(InMemoryUserRepo::new());
    let alice = user("alice@example.com", true, false);
    let admin = user("admin@example.com", true, true);
    let inactive = user("inactive@example.com", false, false);
    repo.insert(alice.clone());
    repo.insert(admin.clone());
    repo.insert(inactive.clone());

    let state = AppState::new(&auth_config(schemes), repo.clone());
    let router = build_router(state.clone(), HttpLimits::default());

    TestApp {
        router,
        state,
        repo,
        alice,
        admin,
        inactive,
    }
}

pub fn basic(email: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{email}:{password}")))
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

pub fn get(uri: &str, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: serde_json::Value, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
