#![allow(dead_code)]

use std::time::Duration;

use chrono::{DateTime, Utc};

use otpgate::usecase::register::RegisterDeviceUseCase;
use otpgate::usecase::verify::{VerifyCodeInput, VerifyCodeUseCase};
use otpgate_totp::{
    CodeVerifier, Credential, CredentialStore, Identity, KeyValueStore, ManualClock, MemoryStore,
    ReplayGuard, Secret, SecretProvisioner, SetOutcome, StoreError, TotpParams,
};

/// First second of time step 56_666_667.
pub const T0: i64 = 1_700_000_010;
pub const STEP: i64 = 30;
pub const SCENARIO_SECRET: &str = "JBSWY3DPEHPK3PXP";
pub const MARKER_TTL: Duration = Duration::from_secs(90);

pub fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap()
}

pub fn verify_input(device_id: &str, code: &str) -> VerifyCodeInput {
    VerifyCodeInput {
        device_id: device_id.to_owned(),
        code: code.to_owned(),
    }
}

// ── Harness ──────────────────────────────────────────────────────────────────

/// Use cases over one in-memory store and one manual clock.
pub struct Harness {
    pub store: MemoryStore<ManualClock>,
    pub clock: ManualClock,
    pub verifier: CodeVerifier,
}

impl Harness {
    pub fn new() -> Self {
        let clock = ManualClock::at_unix(T0);
        Self {
            store: MemoryStore::with_clock(clock.clone()),
            clock,
            verifier: CodeVerifier::default(),
        }
    }

    pub fn credentials(&self) -> CredentialStore<MemoryStore<ManualClock>> {
        CredentialStore::new(self.store.clone())
    }

    pub fn verify_usecase(&self) -> VerifyCodeUseCase<MemoryStore<ManualClock>, ManualClock> {
        VerifyCodeUseCase {
            credentials: self.credentials(),
            replay: ReplayGuard::new(self.store.clone(), MARKER_TTL, &self.verifier),
            verifier: self.verifier,
            clock: self.clock.clone(),
        }
    }

    pub fn register_usecase(&self) -> RegisterDeviceUseCase<MemoryStore<ManualClock>, ManualClock> {
        RegisterDeviceUseCase {
            credentials: self.credentials(),
            provisioner: SecretProvisioner,
            clock: self.clock.clone(),
            issuer: "Test Issuer".to_owned(),
            params: TotpParams::default(),
        }
    }

    /// Store a credential with a known secret, bypassing registration.
    pub async fn enroll(&self, device_id: &str, secret: &str) -> Secret {
        let secret = Secret::parse(secret).unwrap();
        self.credentials()
            .put(&Credential {
                identity: Identity::new(device_id).unwrap(),
                secret: secret.clone(),
                created_at: at(T0),
            })
            .await
            .unwrap();
        secret
    }

    pub fn code_at(&self, secret: &Secret, secs: i64) -> String {
        self.verifier.generate(secret, at(secs)).unwrap()
    }

    pub fn set_time(&self, secs: i64) {
        self.clock.set(at(secs));
    }
}

// ── FailingStore ─────────────────────────────────────────────────────────────

/// Every call fails as if Redis were down.
#[derive(Clone)]
pub struct FailingStore;

impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Err(StoreError::Unavailable(anyhow::anyhow!("connection refused")))
    }

    async fn set(
        &self,
        _key: &str,
        _value: &[u8],
        _ttl: Option<Duration>,
    ) -> Result<(), StoreError> {
        Err(StoreError::Unavailable(anyhow::anyhow!("connection refused")))
    }

    async fn set_if_absent(
        &self,
        _key: &str,
        _value: &[u8],
        _ttl: Duration,
    ) -> Result<SetOutcome, StoreError> {
        Err(StoreError::Unavailable(anyhow::anyhow!("connection refused")))
    }
}

pub fn failing_verify_usecase() -> VerifyCodeUseCase<FailingStore, ManualClock> {
    let verifier = CodeVerifier::default();
    VerifyCodeUseCase {
        credentials: CredentialStore::new(FailingStore),
        replay: ReplayGuard::new(FailingStore, MARKER_TTL, &verifier),
        verifier,
        clock: ManualClock::at_unix(T0),
    }
}
