use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use otpgate_totp::{StoreError, TotpError};

/// Outcomes of a registration or verification request other than success.
///
/// Clients retry differently per variant, so they stay distinct all the way to
/// the response body.
#[derive(Debug, thiserror::Error)]
pub enum OtpServiceError {
    #[error("unknown identity")]
    UnknownIdentity,
    #[error("invalid identity")]
    InvalidIdentity,
    #[error("invalid secret")]
    InvalidSecret,
    #[error("invalid code format")]
    InvalidCodeFormat,
    #[error("invalid code")]
    InvalidCode,
    #[error("code already used")]
    CodeReused,
    #[error("store unavailable")]
    StoreUnavailable(#[source] StoreError),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl OtpServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownIdentity => "UNKNOWN_IDENTITY",
            Self::InvalidIdentity => "INVALID_IDENTITY",
            Self::InvalidSecret => "INVALID_SECRET",
            Self::InvalidCodeFormat => "INVALID_CODE_FORMAT",
            Self::InvalidCode => "INVALID_CODE",
            Self::CodeReused => "CODE_REUSED",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::UnknownIdentity => StatusCode::NOT_FOUND,
            Self::InvalidIdentity | Self::InvalidSecret | Self::InvalidCodeFormat => {
                StatusCode::BAD_REQUEST
            }
            Self::InvalidCode => StatusCode::UNAUTHORIZED,
            Self::CodeReused => StatusCode::CONFLICT,
            Self::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TotpError> for OtpServiceError {
    fn from(err: TotpError) -> Self {
        match err {
            TotpError::EmptyIdentity => Self::InvalidIdentity,
            TotpError::InvalidSecret => Self::InvalidSecret,
            TotpError::InvalidCodeFormat => Self::InvalidCodeFormat,
        }
    }
}

impl From<StoreError> for OtpServiceError {
    fn from(err: StoreError) -> Self {
        Self::StoreUnavailable(err)
    }
}

impl IntoResponse for OtpServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        // 4xx are expected client outcomes and TraceLayer already records them.
        match &self {
            Self::StoreUnavailable(e) => {
                tracing::warn!(error = %e, kind = self.kind(), "store unavailable");
            }
            Self::Internal(e) => {
                tracing::error!(error = %e, kind = "INTERNAL", "internal error");
            }
            _ => {}
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
