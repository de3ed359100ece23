#![allow(dead_code)]

use std::io::Cursor;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use plantmon_api::auth::jwt::JwtConfig;
use plantmon_api::auth::password::hash_password;
use plantmon_api::config::ServerConfig;
use plantmon_api::router::build_app_router;
use plantmon_api::state::AppState;
use plantmon_db::models::user::{CreateUser, User};
use plantmon_db::repositories::UserRepo;
use plantmon_storage::local::LocalImageStore;
use plantmon_storage::StorageConfig;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

/// Public URL prefix the test image store hands out.
pub const MEDIA_BASE_URL: &str = "http://localhost:3000/media";

/// Upload limit used by tests, small enough to trip with a synthetic body.
pub const TEST_MAX_UPLOAD_BYTES: usize = 64 * 1024;

/// Password given to every seeded user.
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Router plus the temp directory backing its local image store.
///
/// The directory is removed when the `TestApp` is dropped.
pub struct TestApp {
    pub router: Router,
    pub pool: PgPool,
    pub media_dir: TempDir,
}

impl TestApp {
    /// Fresh handle to the router (`oneshot` consumes it).
    pub fn app(&self) -> Router {
        self.router.clone()
    }
}

/// Build a test `ServerConfig` storing images under `media_root`.
pub fn test_config(media_root: &std::path::Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        max_upload_bytes: TEST_MAX_UPLOAD_BYTES,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 1440,
        },
        storage: StorageConfig::Local {
            root: media_root.to_path_buf(),
            public_base_url: MEDIA_BASE_URL.to_string(),
        },
        bootstrap_admin: None,
    }
}

/// Build the full application router, exactly as `main.rs` does.
pub fn build_test_app(pool: PgPool) -> TestApp {
    let media_dir = tempfile::tempdir().expect("temp dir should be created");
    let config = test_config(media_dir.path());

    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
        images: Arc::new(LocalImageStore::new(
            media_dir.path().to_path_buf(),
            MEDIA_BASE_URL.to_string(),
        )),
    };

    TestApp {
        router: build_app_router(state, &config),
        pool,
        media_dir,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("request should complete")
}

fn builder(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
}

fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Request<Body> {
    builder(method, uri, token)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, builder(Method::GET, uri, None).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(
        app,
        builder(Method::GET, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request(Method::POST, uri, None, body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, json_request(Method::POST, uri, Some(token), body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    send(
        app,
        builder(Method::POST, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, json_request(Method::PUT, uri, Some(token), body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(
        app,
        builder(Method::DELETE, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

/// POST a `multipart/form-data` body with a single file field.
pub async fn post_file_auth(
    app: Router,
    uri: &str,
    token: &str,
    field: &str,
    data: &[u8],
) -> Response {
    let (content_type, body) = multipart_body(field, "upload.bin", data);
    send(
        app,
        builder(Method::POST, uri, Some(token))
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap(),
    )
    .await
}

/// Read the full response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// Read the full response body as raw bytes.
pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes()
        .to_vec()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a user with [`TEST_PASSWORD`] directly in the database.
pub async fn seed_user(pool: &PgPool, username: &str, roles: &[&str]) -> User {
    let password_hash = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            password_hash,
            roles: roles.iter().map(|r| r.to_string()).collect(),
        },
    )
    .await
    .expect("user creation should succeed")
}

/// Log in via the API and return the access token.
pub async fn login(app: Router, username: &str, password: &str) -> String {
    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "username": username, "password": password }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK, "login should succeed");
    body_json(response).await["access_token"]
        .as_str()
        .expect("access_token should be a string")
        .to_string()
}

/// Seed a `plant_monitoring` user and return their token.
pub async fn monitor_token(test: &TestApp) -> String {
    seed_user(&test.pool, "gardener", &["plant_monitoring"]).await;
    login(test.app(), "gardener", TEST_PASSWORD).await
}

/// Seed an `admin` user and return their token.
pub async fn admin_token(test: &TestApp) -> String {
    seed_user(&test.pool, "root", &["admin"]).await;
    login(test.app(), "root", TEST_PASSWORD).await
}

/// Create a plant via the API and return its JSON.
pub async fn create_plant(test: &TestApp, token: &str, name: &str) -> serde_json::Value {
    let response = post_json_auth(
        test.app(),
        "/api/v1/plants",
        token,
        serde_json::json!({
            "name": name,
            "type": "Fern",
            "location": "Bathroom",
            "description": "Likes humidity",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

/// A reading inside every valid range.
pub fn valid_reading() -> serde_json::Value {
    serde_json::json!({
        "temperature": 21.5,
        "soil_moisture": 42.0,
        "light_level": 850.0,
        "humidity": 60.0,
    })
}

/// Encode a tiny PNG.
pub fn png_bytes() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(2, 2, image::Rgb([30, 160, 60]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .expect("PNG encoding should succeed");
    out.into_inner()
}

/// Build a `multipart/form-data` body with one file field.
pub fn multipart_body(field: &str, filename: &str, data: &[u8]) -> (String, Vec<u8>) {
    let boundary = "plantmon-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; \
             filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={boundary}"), body)
}
