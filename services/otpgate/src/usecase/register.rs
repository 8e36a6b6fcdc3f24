use otpgate_totp::{
    Clock, Credential, CredentialStore, Identity, KeyValueStore, SecretProvisioner, TotpParams,
};

use crate::domain::provisioning::provisioning_uri;
use crate::domain::types::Registration;
use crate::error::OtpServiceError;

pub struct RegisterDeviceInput {
    pub device_id: String,
}

/// Issues a new secret for an identity, replacing any previous one.
pub struct RegisterDeviceUseCase<S, C>
where
    S: KeyValueStore,
    C: Clock,
{
    pub credentials: CredentialStore<S>,
    pub provisioner: SecretProvisioner,
    pub clock: C,
    pub issuer: String,
    pub params: TotpParams,
}

impl<S, C> RegisterDeviceUseCase<S, C>
where
    S: KeyValueStore,
    C: Clock,
{
    pub async fn execute(&self, input: RegisterDeviceInput) -> Result<Registration, OtpServiceError> {
        let identity = Identity::new(&input.device_id)?;
        let secret = self.provisioner.generate_secret();
        let uri = provisioning_uri(&self.issuer, &identity, &secret, &self.params)?;

        let credential = Credential {
            identity: identity.clone(),
            secret: secret.clone(),
            created_at: self.clock.now(),
        };
        self.credentials.put(&credential).await?;

        tracing::info!(identity = %identity, "identity registered");
        Ok(Registration {
            identity,
            secret,
            provisioning_uri: uri,
            created_at: credential.created_at,
        })
    }
}
