use axum::extract::State;
use axum::http::StatusCode;

use crate::state::AppState;

/// Handler for `GET /readyz`: ready once the backing store answers.
pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    let store = &state.store;
    match store.bounded("ping", store.inner().ping()).await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, backend = store.inner().name(), "store not ready");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
