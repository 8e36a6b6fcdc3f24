use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};

use otpgate::config::Settings;
use otpgate::router::build_router;
use otpgate::state::AppState;
use otpgate_totp::{Clock, CodeVerifier, ManualClock, Secret};

use crate::helpers::{STEP, T0};

fn server(clock: &ManualClock) -> TestServer {
    let clock: Arc<dyn Clock> = Arc::new(clock.clone());
    let state = AppState::in_memory(clock, Settings::default());
    TestServer::new(build_router(state)).unwrap()
}

async fn register(server: &TestServer, device_id: &str) -> Secret {
    let response = server
        .post("/register")
        .json(&json!({ "device_id": device_id }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    Secret::parse(body["secret"].as_str().unwrap()).unwrap()
}

#[tokio::test]
async fn health_endpoints_respond() {
    let clock = ManualClock::at_unix(T0);
    let server = server(&clock);

    server.get("/healthz").await.assert_status_ok();
    server.get("/readyz").await.assert_status_ok();

    let response = server.get("/api/healthchecker").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Welcome to TOTP service");
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let clock = ManualClock::at_unix(T0);
    let server = server(&clock);

    let response = server.get("/healthz").await;
    let id = response.header("x-request-id");
    assert!(!id.is_empty());
}

#[tokio::test]
async fn register_returns_provisioning_material() {
    let clock = ManualClock::at_unix(T0);
    let server = server(&clock);

    let response = server
        .post("/register")
        .json(&json!({ "device_id": "dev-1" }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["device_id"], "dev-1");
    assert_eq!(body["secret"].as_str().unwrap().len(), 32);
    assert!(
        body["provisioning_uri"]
            .as_str()
            .unwrap()
            .starts_with("otpauth://totp/")
    );
    assert_eq!(body["created_at"], "2023-11-14T22:13:30.000Z");
}

#[tokio::test]
async fn verify_accepts_then_reports_reuse() {
    let clock = ManualClock::at_unix(T0);
    let server = server(&clock);
    let secret = register(&server, "dev-1").await;
    let code = CodeVerifier::default().generate(&secret, clock.now()).unwrap();

    let first = server
        .post("/verify")
        .json(&json!({ "device_id": "dev-1", "check_code": code }))
        .await;
    first.assert_status_ok();
    let body: Value = first.json();
    assert_eq!(body["valid"], true);
    assert_eq!(body["step"], (T0 / STEP) as u64);

    let second = server
        .post("/verify")
        .json(&json!({ "device_id": "dev-1", "check_code": code }))
        .await;
    second.assert_status(StatusCode::CONFLICT);
    let body: Value = second.json();
    assert_eq!(body["kind"], "CODE_REUSED");
}

#[tokio::test]
async fn verify_distinguishes_failure_kinds() {
    let clock = ManualClock::at_unix(T0);
    let server = server(&clock);
    let secret = register(&server, "dev-1").await;
    let code = CodeVerifier::default().generate(&secret, clock.now()).unwrap();
    let wrong = if code == "000000" { "000001" } else { "000000" };

    let cases = [
        ("dev-42", "123456", StatusCode::NOT_FOUND, "UNKNOWN_IDENTITY"),
        ("dev-1", wrong, StatusCode::UNAUTHORIZED, "INVALID_CODE"),
        ("dev-1", "12ab56", StatusCode::BAD_REQUEST, "INVALID_CODE_FORMAT"),
        ("", "123456", StatusCode::BAD_REQUEST, "INVALID_IDENTITY"),
    ];
    for (device_id, check_code, status, kind) in cases {
        let response = server
            .post("/verify")
            .json(&json!({ "device_id": device_id, "check_code": check_code }))
            .await;
        response.assert_status(status);
        let body: Value = response.json();
        assert_eq!(body["kind"], kind, "device {device_id:?} code {check_code:?}");
    }
}

#[tokio::test]
async fn verify_window_follows_the_clock() {
    let clock = ManualClock::at_unix(T0);
    let server = server(&clock);
    let secret = register(&server, "dev-1").await;
    let code = CodeVerifier::default().generate(&secret, clock.now()).unwrap();

    clock.advance(chrono::Duration::seconds(2 * STEP));
    let response = server
        .post("/verify")
        .json(&json!({ "device_id": "dev-1", "check_code": code }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}
