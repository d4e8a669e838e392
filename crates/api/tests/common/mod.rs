#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use siwes_api::auth::demo::DemoDirectory;
use siwes_api::auth::AuthBackend;
use siwes_api::config::ServerConfig;
use siwes_api::router::build_app_router;
use siwes_api::state::AppState;
use siwes_db::seed::demo_dataset;
use siwes_identity::memory::InMemoryProvider;
use siwes_identity::{auth_channel, IdentityProvider};
use siwes_session::{SessionListener, SessionStore};
use tower::ServiceExt;

pub const DEMO_PASSWORD: &str = "siwes-demo";

pub const STUDENT_EMAIL: &str = "student@aapoly.edu.ng";
pub const PENDING_STUDENT_EMAIL: &str = "student2@aapoly.edu.ng";
pub const SUPERVISOR_EMAIL: &str = "supervisor@aapoly.edu.ng";
pub const COORDINATOR_EMAIL: &str = "coordinator@aapoly.edu.ng";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        session_storage_path: PathBuf::from("auth-storage.json"),
        seed_path: None,
        demo_password: DEMO_PASSWORD.to_string(),
    }
}

fn app_with(state: AppState) -> Router {
    let config = test_config();
    build_app_router(state, &config)
}

/// Demo-mode app over the built-in seed data with an in-memory session.
pub fn build_test_app() -> Router {
    let directory = DemoDirectory::new(DEMO_PASSWORD).expect("hashing should succeed");
    app_with(AppState {
        store: siwes_db::create_store(demo_dataset()),
        config: Arc::new(test_config()),
        session: Arc::new(SessionStore::in_memory()),
        auth: Arc::new(AuthBackend::Demo(directory)),
    })
}

/// Provider-mode app backed by `provider`, with the session listener running.
///
/// Returns the session store too so tests can inspect it directly.
pub fn build_provider_app(provider: Arc<InMemoryProvider>) -> (Router, Arc<SessionStore>) {
    let provider: Arc<dyn IdentityProvider> = provider;
    let session = Arc::new(SessionStore::in_memory().with_provider(Arc::clone(&provider)));
    let (events, receiver) = auth_channel(8);
    tokio::spawn(SessionListener::run(
        Arc::clone(&session),
        Arc::clone(&provider),
        receiver,
    ));

    let app = app_with(AppState {
        store: siwes_db::create_store(demo_dataset()),
        config: Arc::new(test_config()),
        session: Arc::clone(&session),
        auth: Arc::new(AuthBackend::Provider { provider, events }),
    });
    (app, session)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Log in through the API with the demo password and return the `data` body.
pub async fn login(app: &Router, email: &str) -> serde_json::Value {
    let body = serde_json::json!({ "email": email, "password": DEMO_PASSWORD });
    let response = post_json(app.clone(), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK, "login as {email} should succeed");
    body_json(response).await["data"].clone()
}

pub async fn logout(app: &Router) {
    let response = post_empty(app.clone(), "/api/v1/auth/logout").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
