use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::error::OtpServiceError;
use crate::state::AppState;
use crate::usecase::verify::{VerifyCodeInput, VerifyCodeUseCase};

#[derive(Deserialize)]
pub struct VerifyRequest {
    pub device_id: String,
    pub check_code: String,
}

#[derive(Serialize)]
pub struct VerifyResponse {
    pub device_id: String,
    pub valid: bool,
    pub step: u64,
}

pub async fn verify_code(
    State(state): State<AppState>,
    Json(body): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>, OtpServiceError> {
    let usecase = VerifyCodeUseCase {
        credentials: state.credential_store(),
        replay: state.replay_guard(),
        verifier: state.verifier(),
        clock: state.clock.clone(),
    };
    let accepted = usecase
        .execute(VerifyCodeInput {
            device_id: body.device_id,
            code: body.check_code,
        })
        .await?;

    Ok(Json(VerifyResponse {
        device_id: accepted.identity.into(),
        valid: true,
        step: accepted.step,
    }))
}
