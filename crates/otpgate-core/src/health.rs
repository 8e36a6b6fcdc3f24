use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;

/// Handler for `GET /healthz`, liveness check.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[derive(Debug, Serialize)]
pub struct WelcomeResponse {
    pub message: &'static str,
}

/// Handler for `GET /api/healthchecker`. Kept for clients that probe the legacy path.
pub async fn healthchecker() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to TOTP service",
    })
}
