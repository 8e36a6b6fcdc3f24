use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::identity::Identity;
use crate::secret::Secret;
use crate::store::KeyValueStore;

pub const DEFAULT_CREDENTIAL_PREFIX: &str = "devices:";

/// The shared secret on record for one identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub identity: Identity,
    pub secret: Secret,
    pub created_at: DateTime<Utc>,
}

/// Written once when a code is first accepted for an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsedCodeMarker {
    pub identity: Identity,
    pub code: String,
    pub claimed_at: DateTime<Utc>,
}

/// Typed access to credentials kept in a [`KeyValueStore`].
///
/// One key per identity; `put` replaces whatever was there.
#[derive(Debug, Clone)]
pub struct CredentialStore<S> {
    store: S,
    prefix: String,
    ttl: Option<Duration>,
}

impl<S: KeyValueStore> CredentialStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            prefix: DEFAULT_CREDENTIAL_PREFIX.to_owned(),
            ttl: None,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Expire credentials after `ttl`. Unset means they live until replaced.
    pub fn with_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn key(&self, identity: &Identity) -> String {
        format!("{}{}", self.prefix, identity)
    }

    pub async fn put(&self, credential: &Credential) -> Result<(), StoreError> {
        let value = serde_json::to_vec(credential).map_err(|e| StoreError::Unavailable(e.into()))?;
        self.store
            .set(&self.key(&credential.identity), &value, self.ttl)
            .await
    }

    pub async fn get(&self, identity: &Identity) -> Result<Option<Credential>, StoreError> {
        let Some(raw) = self.store.get(&self.key(identity)).await? else {
            return Ok(None);
        };
        let credential: Credential = serde_json::from_slice(&raw).map_err(|e| {
            tracing::error!(identity = %identity, error = %e, "corrupt credential record");
            StoreError::Unavailable(anyhow::Error::new(e).context("corrupt credential record"))
        })?;
        Ok(Some(credential))
    }
}
