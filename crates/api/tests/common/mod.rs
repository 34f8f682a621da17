//! Shared helpers for API integration tests.

#![allow(dead_code)]

use std::path::Path;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use cinelog_api::auth::jwt::{generate_token, JwtConfig};
use cinelog_api::auth::password::hash_password;
use cinelog_api::config::ServerConfig;
use cinelog_api::router::build_app_router;
use cinelog_api::state::AppState;
use cinelog_db::models::user::{CreateUser, User};
use cinelog_db::repositories::UserRepo;

/// Password given to every user made by [`create_test_user`].
pub const TEST_PASSWORD: &str = "test_password_123!";

/// Boundary used by [`multipart_body`].
pub const BOUNDARY: &str = "cinelog-test-boundary";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(uploads_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        uploads_dir: uploads_dir.to_path_buf(),
        max_upload_bytes: 1024 * 1024,
        jwt: test_jwt_config(),
    }
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret-long-enough".to_string(),
        expiry_mins: 60,
    }
}

/// Build the full application router (same middleware stack as production)
/// with uploads going to a shared scratch directory.
pub fn build_test_app(pool: PgPool) -> Router {
    let dir = std::env::temp_dir().join("cinelog-test-uploads");
    build_test_app_with_uploads(pool, &dir)
}

/// Like [`build_test_app`] but writing uploads to `uploads_dir`.
pub fn build_test_app_with_uploads(pool: PgPool, uploads_dir: &Path) -> Router {
    let config = test_config(uploads_dir);
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Users and tokens
// ---------------------------------------------------------------------------

/// Insert a user directly and return it.
pub async fn create_test_user(pool: &PgPool, email: &str) -> User {
    let input = CreateUser {
        name: "Test User".to_string(),
        email: email.to_string(),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// A valid bearer token for `user_id`, signed with the test secret.
pub fn token_for(user_id: i64) -> String {
    generate_token(user_id, &test_jwt_config()).expect("token generation should succeed")
}

/// Create a user and return its id with a bearer token.
pub async fn signed_in_user(pool: &PgPool, email: &str) -> (i64, String) {
    let user = create_test_user(pool, email).await;
    (user.id, token_for(user.id))
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn builder(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(t) => builder.header("authorization", format!("Bearer {t}")),
        None => builder,
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, builder(Method::GET, uri, None).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        builder(Method::GET, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(
        app,
        builder(Method::POST, uri, None)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(
        app,
        builder(Method::POST, uri, Some(token))
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(
        app,
        builder(Method::PUT, uri, Some(token))
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        builder(Method::DELETE, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

/// Send a multipart form built by [`multipart_body`].
pub async fn send_multipart(
    app: Router,
    method: Method,
    uri: &str,
    token: &str,
    body: Vec<u8>,
) -> Response<Body> {
    send(
        app,
        builder(method, uri, Some(token))
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header("content-length", body.len())
            .body(Body::from(body))
            .unwrap(),
    )
    .await
}

/// Encode text fields and an optional `(field, file name, bytes)` file part.
pub fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((name, file_name, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; \
                 filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A valid record payload; tweak fields per test.
pub fn record_json(title: &str, media_type: &str) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "type": media_type,
        "director": "Some Director",
        "duration": "2h",
        "year": 2010,
    })
}

/// Create a record through the API and return its id.
pub async fn create_record(app: Router, token: &str, body: serde_json::Value) -> i64 {
    let response = post_json_auth(app, "/api/v1/records", token, body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}
