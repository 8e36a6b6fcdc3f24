use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use otpgate_core::serde::to_rfc3339_ms;

use crate::error::OtpServiceError;
use crate::state::AppState;
use crate::usecase::register::{RegisterDeviceInput, RegisterDeviceUseCase};

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub device_id: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub device_id: String,
    pub secret: String,
    pub provisioning_uri: String,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

pub async fn register_device(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), OtpServiceError> {
    let usecase = RegisterDeviceUseCase {
        credentials: state.credential_store(),
        provisioner: state.provisioner(),
        clock: state.clock.clone(),
        issuer: state.settings.issuer.clone(),
        params: *state.verifier().params(),
    };
    let registration = usecase
        .execute(RegisterDeviceInput {
            device_id: body.device_id,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            device_id: registration.identity.into(),
            secret: registration.secret.into(),
            provisioning_uri: registration.provisioning_uri,
            created_at: registration.created_at,
        }),
    ))
}
