#![allow(dead_code)]

use std::path::PathBuf;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use topicvault_core::tokens::generate_token;
use topicvault_db::models::user::CreateUser;
use topicvault_db::repositories::UserRepo;
use topicvault_db::{open_store, Store};
use tower::ServiceExt;

use topicvault_api::config::ServerConfig;
use topicvault_api::router::build_app_router;
use topicvault_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config(data_dir: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        data_dir,
        bootstrap_admin_token: None,
    }
}

/// A store in a throwaway directory. Keep the `TempDir` alive for the whole
/// test.
pub async fn test_store() -> (TempDir, Store) {
    let dir = TempDir::new().expect("temp dir");
    let store = open_store(dir.path()).await.expect("store should open");
    (dir, store)
}

/// Build the full application router over `store`, with the same middleware
/// stack production uses.
pub fn build_test_app(store: Store) -> Router {
    let config = test_config(store.data_dir().to_path_buf());
    let state = AppState::new(store);
    build_app_router(state, &config)
}

/// Create a principal with `role` and return its plaintext bearer token.
pub async fn create_principal(store: &Store, name: &str, role: &str) -> String {
    let token = generate_token();
    UserRepo::create(
        store,
        &CreateUser {
            name: name.to_string(),
            role: role.to_string(),
            token_hash: token.hash,
        },
    )
    .await
    .expect("principal creation should succeed");
    token.plaintext
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should be handled")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::get(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::post(uri)
        .header("authorization", format!("Bearer {token}"))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::put(uri)
        .header("authorization", format!("Bearer {token}"))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::delete(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}
