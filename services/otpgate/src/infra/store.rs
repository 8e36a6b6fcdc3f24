use std::sync::Arc;
use std::time::Duration;

use otpgate_totp::{Clock, KeyValueStore, MemoryStore, SetOutcome, StoreError};

use crate::infra::cache::RedisStore;

/// The store the service runs on, picked at startup.
#[derive(Clone)]
pub enum StoreBackend {
    Redis(RedisStore),
    Memory(MemoryStore<Arc<dyn Clock>>),
}

impl StoreBackend {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Redis(_) => "redis",
            Self::Memory(_) => "memory",
        }
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        match self {
            Self::Redis(store) => store.ping().await,
            Self::Memory(_) => Ok(()),
        }
    }
}

impl KeyValueStore for StoreBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        match self {
            Self::Redis(store) => store.get(key).await,
            Self::Memory(store) => store.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<(), StoreError> {
        match self {
            Self::Redis(store) => store.set(key, value, ttl).await,
            Self::Memory(store) => store.set(key, value, ttl).await,
        }
    }

    async fn set_if_absent(
        &self,
        key: &str,
        value: &[u8],
        ttl: Duration,
    ) -> Result<SetOutcome, StoreError> {
        match self {
            Self::Redis(store) => store.set_if_absent(key, value, ttl).await,
            Self::Memory(store) => store.set_if_absent(key, value, ttl).await,
        }
    }
}
