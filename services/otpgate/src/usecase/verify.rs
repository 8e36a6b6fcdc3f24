use otpgate_totp::{
    ClaimOutcome, Clock, CodeVerifier, CredentialStore, Identity, KeyValueStore, ReplayGuard,
};

use crate::domain::types::Acceptance;
use crate::error::OtpServiceError;

pub struct VerifyCodeInput {
    pub device_id: String,
    pub code: String,
}

/// Checks a submitted code and spends it.
///
/// Malformed input is rejected before the store is touched. After that the
/// credential lookup, the TOTP check and the single-use claim run once each, in
/// that order; the first failing stage decides the error.
pub struct VerifyCodeUseCase<S, C>
where
    S: KeyValueStore,
    C: Clock,
{
    pub credentials: CredentialStore<S>,
    pub replay: ReplayGuard<S>,
    pub verifier: CodeVerifier,
    pub clock: C,
}

impl<S, C> VerifyCodeUseCase<S, C>
where
    S: KeyValueStore,
    C: Clock,
{
    pub async fn execute(&self, input: VerifyCodeInput) -> Result<Acceptance, OtpServiceError> {
        let identity = Identity::new(&input.device_id)?;
        let code = self.verifier.normalize_code(&input.code)?;
        let now = self.clock.now();

        // 1. Credential lookup → 404 if never registered
        let credential = self
            .credentials
            .get(&identity)
            .await?
            .ok_or(OtpServiceError::UnknownIdentity)?;

        // 2. TOTP check over the skew window → 401 if no step matches
        let Some(step) = self.verifier.verify(&credential.secret, &code, now)? else {
            tracing::debug!(identity = %identity, "code rejected");
            return Err(OtpServiceError::InvalidCode);
        };

        // 3. Spend the code → 409 if someone got there first
        match self.replay.claim(&identity, &code, now).await? {
            ClaimOutcome::Claimed => {
                tracing::info!(identity = %identity, step, "code accepted");
                Ok(Acceptance { identity, step })
            }
            ClaimOutcome::AlreadyUsed => {
                tracing::info!(identity = %identity, step, "code replay refused");
                Err(OtpServiceError::CodeReused)
            }
        }
    }
}
