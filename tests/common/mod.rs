#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use tutorhub::cli::create_admin;
use tutorhub::router::init_router;
use tutorhub::state::AppState;
use tutorhub::testing::MemoryStorage;
use tutorhub_auth::TokenService;
use tutorhub_config::{CorsConfig, StorageConfig};

pub const TEST_SECRET: &[u8] = b"integration-test-secret";
pub const MULTIPART_BOUNDARY: &str = "tutorhub-test-boundary";

pub struct TestApp {
    pub router: Router,
    pub tokens: TokenService,
    pub storage: MemoryStorage,
}

/// A router over `pool` with in-memory thumbnail storage.
pub fn setup_test_app(pool: PgPool) -> TestApp {
    let tokens = TokenService::with_secret(TEST_SECRET, 24);
    let storage = MemoryStorage::new();
    let state = AppState::new(
        pool,
        tokens.clone(),
        Arc::new(storage.clone()),
        StorageConfig::from_lookup(|_| None),
        CorsConfig::from_lookup(|_| None),
    );

    TestApp {
        router: init_router(state, None),
        tokens,
        storage,
    }
}

pub fn generate_unique_email() -> String {
    format!("test_{}@example.com", Uuid::new_v4().simple())
}

pub async fn send(app: &TestApp, request: Request<Body>) -> (u16, Value) {
    let response = app.router.clone().oneshot(request).await.unwrap();
    read_json(response).await
}

pub async fn read_json(response: Response<Body>) -> (u16, Value) {
    let status = response.status().as_u16();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

/// A `multipart/form-data` request with text fields and an optional file part
/// named `thumbnail`.
pub fn multipart_request(
    method: &str,
    uri: &str,
    token: &str,
    fields: &[(&str, &str)],
    thumbnail: Option<(&str, &[u8])>,
) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, bytes)) = thumbnail {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"thumbnail\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        )
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body))
        .unwrap()
}

/// Register through the API and return `(token, user_id)`.
pub async fn register(app: &TestApp, email: &str, role: &str) -> (String, i64) {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/api/v1/register",
            None,
            json!({"name": "Test User", "email": email, "password": "p", "role": role}),
        ),
    )
    .await;
    assert_eq!(status, 201, "register failed: {body}");
    (
        body["data"]["token"].as_str().unwrap().to_string(),
        body["data"]["user"]["id"].as_i64().unwrap(),
    )
}

/// Create an admin directly in the database and log in.
pub async fn admin_token(app: &TestApp, pool: &PgPool) -> String {
    let email = generate_unique_email();
    create_admin(pool, "Admin", &email, "admin-password")
        .await
        .unwrap();

    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/api/v1/login",
            None,
            json!({"email": email, "password": "admin-password"}),
        ),
    )
    .await;
    assert_eq!(status, 200, "admin login failed: {body}");
    body["data"]["token"].as_str().unwrap().to_string()
}

pub async fn tutor_id_of(pool: &PgPool, user_id: i64) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT tutor_id FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Seed an active feature with one subject and return `(feature_id, subject_id)`.
pub async fn seed_catalog(app: &TestApp, admin: &str, roles: &str) -> (i64, i64) {
    let feature_name = format!("Feature {}", Uuid::new_v4().simple());
    let (status, feature) = send(
        app,
        json_request(
            "POST",
            "/api/v1/features",
            Some(admin),
            json!({"name": feature_name, "roles": roles}),
        ),
    )
    .await;
    assert_eq!(status, 201, "feature create failed: {feature}");
    let feature_id = feature["data"]["id"].as_i64().unwrap();

    let (status, subject) = send(
        app,
        json_request(
            "POST",
            "/api/v1/matpels",
            Some(admin),
            json!({"feature_id": feature_id, "name": "Math"}),
        ),
    )
    .await;
    assert_eq!(status, 201, "subject create failed: {subject}");

    (feature_id, subject["data"]["id"].as_i64().unwrap())
}
