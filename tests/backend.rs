//! End-to-end tests against a loopback backend
//!
//! A small axum app stands in for the judge backend so the real reqwest
//! transport, cookie jar and dispatcher run together.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    body::Bytes,
    http::{HeaderMap, Method, StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use ojfront::{
    AdminApi, ClientError, Dispatcher, EnvelopeMode, OjApi,
    config::ApiConfig,
    notify::{Notifier, StoreDispatch, UiAction},
    transport::{ApiRequest, HttpTransport, Transport},
};

// =============================================================================
// Loopback backend
// =============================================================================

async fn csrf() -> impl IntoResponse {
    (
        [(header::SET_COOKIE, "csrftoken=tok123; Path=/")],
        Json(json!({"error": null, "data": "ok"})),
    )
}

async fn echo(method: Method, headers: HeaderMap, body: Bytes) -> Json<Value> {
    let csrf = headers
        .get("x-csrftoken")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    Json(json!({
        "error": null,
        "data": {"method": method.as_str(), "csrf": csrf, "body": body}
    }))
}

async fn broken() -> impl IntoResponse {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": "server-error", "data": "boom"})),
    )
}

async fn bad_gateway() -> impl IntoResponse {
    (StatusCode::BAD_GATEWAY, "upstream down")
}

async fn plain() -> Json<Value> {
    Json(json!({
        "id": 4,
        "title": "Homework",
        "start_time": "2024-03-01T08:00:00Z",
        "end_time": "2024-03-08T08:00:00Z"
    }))
}

async fn expired() -> Json<Value> {
    Json(json!({"error": "permission-denied", "data": "Please login first"}))
}

async fn spawn_backend() -> SocketAddr {
    let app = Router::new()
        .route("/api/csrf", get(csrf))
        .route("/api/echo", get(echo).post(echo).put(echo).delete(echo))
        .route("/api/broken", get(broken))
        .route("/api/bad_gateway", get(bad_gateway))
        .route("/api/admin/assignments/4/", get(plain))
        .route("/api/profile", get(expired));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn config(addr: SocketAddr) -> ApiConfig {
    ApiConfig {
        base_url: format!("http://{}/api", addr),
        ..ApiConfig::default()
    }
}

// =============================================================================
// Recorders
// =============================================================================

#[derive(Default)]
struct Recorder {
    successes: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
    actions: Mutex<Vec<UiAction>>,
}

impl Notifier for Recorder {
    fn success(&self, message: &str) {
        self.successes.lock().unwrap().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

impl StoreDispatch for Recorder {
    fn dispatch(&self, action: UiAction) {
        self.actions.lock().unwrap().push(action);
    }
}

impl Recorder {
    fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }

    fn successes(&self) -> Vec<String> {
        self.successes.lock().unwrap().clone()
    }
}

// =============================================================================
// Transport
// =============================================================================

#[tokio::test]
async fn test_csrf_header_mirrors_cookie_on_mutating_requests() {
    let addr = spawn_backend().await;
    let transport = HttpTransport::new(&config(addr)).unwrap();

    // no cookie yet
    let raw = transport
        .send(&ApiRequest::post("echo").json(json!({"a": 1})))
        .await
        .unwrap();
    assert_eq!(raw.body.unwrap()["data"]["csrf"], Value::Null);

    tokio_test::assert_ok!(transport.send(&ApiRequest::get("csrf")).await);

    let raw = transport
        .send(&ApiRequest::post("echo").json(json!({"a": 1})))
        .await
        .unwrap();
    let body = raw.body.unwrap();
    let data = &body["data"];
    assert_eq!(data["csrf"], "tok123");
    assert_eq!(data["body"], json!({"a": 1}));

    let raw = transport.send(&ApiRequest::get("echo")).await.unwrap();
    let body = raw.body.unwrap();
    let data = &body["data"];
    assert_eq!(data["csrf"], Value::Null);
    assert_eq!(data["method"], "GET");
}

#[tokio::test]
async fn test_get_never_carries_a_body() {
    let addr = spawn_backend().await;
    let transport = HttpTransport::new(&config(addr)).unwrap();

    let raw = transport
        .send(&ApiRequest::get("echo").json(json!({"ignored": true})))
        .await
        .unwrap();
    assert_eq!(raw.body.unwrap()["data"]["body"], Value::Null);
}

#[tokio::test]
async fn test_non_json_error_body_is_kept_as_text() {
    let addr = spawn_backend().await;
    let transport = HttpTransport::new(&config(addr)).unwrap();

    let raw = transport.send(&ApiRequest::get("bad_gateway")).await.unwrap();
    assert_eq!(raw.status, 502);
    assert_eq!(raw.status_text, "Bad Gateway");
    assert_eq!(raw.body, Some(json!("upstream down")));
}

// =============================================================================
// Dispatcher over HTTP
// =============================================================================

#[tokio::test]
async fn test_http_error_notifies_payload_data() {
    let addr = spawn_backend().await;
    let recorder = Arc::new(Recorder::default());
    let api = AdminApi::new(
        Dispatcher::builder(Arc::new(HttpTransport::new(&config(addr)).unwrap()))
            .notifier(recorder.clone())
            .build(),
    );

    let err = api
        .dispatcher()
        .dispatch(ApiRequest::get("broken"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(recorder.errors(), vec!["boom".to_string()]);
    assert!(recorder.successes().is_empty());
}

#[tokio::test]
async fn test_http_error_without_payload_message_uses_status_line() {
    let addr = spawn_backend().await;
    let recorder = Arc::new(Recorder::default());
    let dispatcher = Dispatcher::builder(Arc::new(HttpTransport::new(&config(addr)).unwrap()))
        .notifier(recorder.clone())
        .build();

    tokio_test::assert_err!(dispatcher.dispatch(ApiRequest::get("bad_gateway")).await);
    assert_eq!(recorder.errors(), vec!["Error 502: Bad Gateway".to_string()]);
}

#[tokio::test]
async fn test_mutating_call_notifies_success() {
    let addr = spawn_backend().await;
    let recorder = Arc::new(Recorder::default());
    let dispatcher = Dispatcher::builder(Arc::new(HttpTransport::new(&config(addr)).unwrap()))
        .notifier(recorder.clone())
        .build();

    let data: Value = dispatcher
        .put("echo", &json!({"shared": true}))
        .await
        .unwrap();
    assert_eq!(data["method"], "PUT");
    assert_eq!(recorder.successes(), vec!["Succeeded".to_string()]);
    assert!(recorder.errors().is_empty());
}

#[tokio::test]
async fn test_compat_and_strict_handling_of_bare_bodies() {
    let addr = spawn_backend().await;

    let recorder = Arc::new(Recorder::default());
    let admin = AdminApi::new(
        Dispatcher::builder(Arc::new(HttpTransport::new(&config(addr)).unwrap()))
            .notifier(recorder.clone())
            .mode(EnvelopeMode::Compat)
            .build(),
    );
    let assignment = admin.get_assignment(4).await.unwrap();
    assert_eq!(assignment.id, 4);
    assert_eq!(assignment.title, "Homework");
    assert!(recorder.errors().is_empty());

    let recorder = Arc::new(Recorder::default());
    let strict = Dispatcher::builder(Arc::new(HttpTransport::new(&config(addr)).unwrap()))
        .notifier(recorder.clone())
        .mode(EnvelopeMode::Strict)
        .build();
    let err = strict
        .dispatch(ApiRequest::get("admin/assignments/4/"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Domain { .. }));
    assert_eq!(
        recorder.errors(),
        vec!["Malformed response from server".to_string()]
    );
}

#[tokio::test]
async fn test_expired_session_opens_login_dialog() {
    let addr = spawn_backend().await;
    let recorder = Arc::new(Recorder::default());
    let api = OjApi::connect(&config(addr), recorder.clone(), recorder.clone()).unwrap();

    let err = api.get_user_info(None).await.unwrap_err();
    assert!(err.is_login_required("Please login"));
    assert_eq!(recorder.errors(), vec!["Please login first".to_string()]);
    assert_eq!(
        *recorder.actions.lock().unwrap(),
        vec![UiAction::show_login()]
    );
}

#[tokio::test]
async fn test_unreachable_backend_reports_network_error() {
    // grab a free port, then close it
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let recorder = Arc::new(Recorder::default());
    let api = OjApi::connect(&config(addr), recorder.clone(), recorder.clone()).unwrap();

    let err = api.get_website_conf().await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)));
    assert_eq!(
        recorder.errors(),
        vec!["Network error or server unavailable".to_string()]
    );
    assert!(recorder.actions.lock().unwrap().is_empty());
}
