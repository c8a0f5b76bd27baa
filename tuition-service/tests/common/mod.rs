//! Common test utilities for tuition-service integration tests.

use axum::body::Body;
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use std::sync::Once;
use tempfile::TempDir;
use tower::util::ServiceExt;
use tuition_service::config::{AdminSettings, ServerSettings, Settings, StoreSettings};
use tuition_service::services::store::Store;
use tuition_service::startup::build_router;
use tuition_service::AppState;

static INIT: Once = Once::new();

/// Initialize tracing and the metrics registry for tests (only once).
pub fn init_test_env() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,tuition_service=debug")
            .with_test_writer()
            .try_init()
            .ok();
        tuition_service::services::metrics::init_metrics();
    });
}

/// Build a router backed by a fresh temporary snapshot directory. The
/// returned TempDir must stay alive for the duration of the test.
pub async fn spawn_app() -> (Router, TempDir) {
    init_test_env();

    let tmp = TempDir::new().expect("Failed to create temp data dir");
    let config = Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        store: StoreSettings {
            data_dir: tmp.path().to_path_buf(),
        },
        admin: AdminSettings::default(),
    };

    let store = Arc::new(
        Store::open(tmp.path())
            .await
            .expect("Failed to open snapshot store"),
    );
    let app = build_router(AppState::new(config, store));

    (app, tmp)
}

/// Fire one request at the in-process router and decode the response.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, HeaderMap, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("Failed to build request"),
        None => builder.body(Body::empty()).expect("Failed to build request"),
    };

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to execute request");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = http_body_util::BodyExt::collect(response.into_body())
        .await
        .expect("Failed to read response body")
        .to_bytes();

    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    (status, headers, body)
}

/// Log in as the default admin and return the session cookie.
pub async fn login(app: &Router) -> String {
    let (status, headers, _) = send(
        app,
        "POST",
        "/api/login",
        None,
        Some(json!({ "username": "admin", "password": "admin123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "admin login should succeed");

    headers
        .get(header::SET_COOKIE)
        .expect("login should set a session cookie")
        .to_str()
        .expect("cookie should be valid UTF-8")
        .split(';')
        .next()
        .expect("cookie should have a value")
        .to_string()
}

/// Register a student with an itemized fee breakdown and return the record.
pub async fn create_test_student(
    app: &Router,
    cookie: &str,
    nama: &str,
    nis: &str,
    status: &str,
    rincian: Value,
) -> Value {
    let (status_code, _, student) = send(
        app,
        "POST",
        "/api/students",
        Some(cookie),
        Some(json!({
            "nama": nama,
            "kelas": "X TKJ 1",
            "nis": nis,
            "nisn": format!("00{nis}"),
            "alamat": "Cisauk",
            "namaOrangTua": "Bapak Wali",
            "status": status,
            "tahunAjaran": "2024/2025",
        })),
    )
    .await;
    assert_eq!(status_code, StatusCode::CREATED, "student creation failed");

    let id = student["id"].as_str().expect("student id").to_string();
    let (status_code, _, student) = send(
        app,
        "PUT",
        &format!("/api/students/{id}/rincian"),
        Some(cookie),
        Some(rincian),
    )
    .await;
    assert_eq!(status_code, StatusCode::OK, "rincian replacement failed");

    student
}
