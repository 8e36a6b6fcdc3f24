use std::sync::Arc;

use otpgate_totp::{
    Clock, CodeVerifier, CredentialStore, Deadline, MemoryStore, ReplayGuard, SecretProvisioner,
    SystemClock,
};

use crate::config::{OtpgateConfig, Settings};
use crate::infra::cache::RedisStore;
use crate::infra::store::StoreBackend;

pub type AppStore = Deadline<StoreBackend>;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub store: AppStore,
    pub clock: Arc<dyn Clock>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(backend: StoreBackend, clock: Arc<dyn Clock>, settings: Settings) -> Self {
        Self {
            store: Deadline::new(backend, settings.store_timeout),
            clock,
            settings: Arc::new(settings),
        }
    }

    /// Wire the store named by `config`: Redis when `REDIS_URL` is set, otherwise in-process.
    pub fn from_config(config: &OtpgateConfig) -> anyhow::Result<Self> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let backend = match &config.redis_url {
            Some(url) => StoreBackend::Redis(RedisStore::from_url(url)?),
            None => {
                tracing::warn!("REDIS_URL not set; using in-process store, state is lost on restart");
                StoreBackend::Memory(MemoryStore::with_clock(Arc::clone(&clock)))
            }
        };
        Ok(Self::new(backend, clock, Settings::from(config)))
    }

    /// In-process state on the given clock.
    pub fn in_memory(clock: Arc<dyn Clock>, settings: Settings) -> Self {
        let backend = StoreBackend::Memory(MemoryStore::with_clock(Arc::clone(&clock)));
        Self::new(backend, clock, settings)
    }

    pub fn verifier(&self) -> CodeVerifier {
        self.settings.verifier
    }

    pub fn provisioner(&self) -> SecretProvisioner {
        SecretProvisioner
    }

    pub fn credential_store(&self) -> CredentialStore<AppStore> {
        CredentialStore::new(self.store.clone())
            .with_prefix(self.settings.credential_prefix.clone())
            .with_ttl(self.settings.credential_ttl)
    }

    pub fn replay_guard(&self) -> ReplayGuard<AppStore> {
        ReplayGuard::new(
            self.store.clone(),
            self.settings.marker_ttl,
            &self.settings.verifier,
        )
        .with_prefix(self.settings.used_code_prefix.clone())
    }
}
