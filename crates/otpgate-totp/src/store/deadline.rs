use std::future::Future;
use std::time::Duration;

use crate::error::StoreError;

use super::{KeyValueStore, SetOutcome};

/// Bounds every call on the wrapped store by a fixed timeout.
#[derive(Debug, Clone)]
pub struct Deadline<S> {
    inner: S,
    timeout: Duration,
}

impl<S> Deadline<S> {
    pub fn new(inner: S, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Run `fut` under this deadline. `op` names the call in the timeout log.
    pub async fn bounded<T>(
        &self,
        op: &'static str,
        fut: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    op,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "store call timed out"
                );
                Err(StoreError::Timeout)
            }
        }
    }
}

impl<S: KeyValueStore> KeyValueStore for Deadline<S> {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.bounded("get", self.inner.get(key)).await
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<(), StoreError> {
        self.bounded("set", self.inner.set(key, value, ttl)).await
    }

    async fn set_if_absent(
        &self,
        key: &str,
        value: &[u8],
        ttl: Duration,
    ) -> Result<SetOutcome, StoreError> {
        self.bounded("set_if_absent", self.inner.set_if_absent(key, value, ttl))
            .await
    }
}
