use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use otpgate_core::health::{healthchecker, healthz};
use otpgate_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{health::readyz, register::register_device, verify::verify_code};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/api/healthchecker", get(healthchecker))
        // Enrollment
        .route("/register", post(register_device))
        // Verification
        .route("/verify", post(verify_code))
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
