use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::credential::UsedCodeMarker;
use crate::error::StoreError;
use crate::identity::Identity;
use crate::store::{KeyValueStore, SetOutcome};
use crate::verifier::CodeVerifier;

pub const DEFAULT_USED_CODE_PREFIX: &str = "codes:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// First use of this code for this identity.
    Claimed,
    /// Someone already spent it.
    AlreadyUsed,
}

/// Lets each (identity, code) pair authenticate at most once.
#[derive(Debug, Clone)]
pub struct ReplayGuard<S> {
    store: S,
    prefix: String,
    marker_ttl: Duration,
}

impl<S: KeyValueStore> ReplayGuard<S> {
    /// `marker_ttl` is raised to the verifier's replay horizon so a marker never
    /// expires while its code could still validate.
    pub fn new(store: S, marker_ttl: Duration, verifier: &CodeVerifier) -> Self {
        Self {
            store,
            prefix: DEFAULT_USED_CODE_PREFIX.to_owned(),
            marker_ttl: marker_ttl.max(verifier.replay_horizon()),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn marker_ttl(&self) -> Duration {
        self.marker_ttl
    }

    pub fn key(&self, identity: &Identity, code: &str) -> String {
        format!("{}{}:{}", self.prefix, identity, code)
    }

    /// Atomically record first use of `code` by `identity`.
    pub async fn claim(
        &self,
        identity: &Identity,
        code: &str,
        at: DateTime<Utc>,
    ) -> Result<ClaimOutcome, StoreError> {
        let marker = UsedCodeMarker {
            identity: identity.clone(),
            code: code.to_owned(),
            claimed_at: at,
        };
        let value = serde_json::to_vec(&marker).map_err(|e| StoreError::Unavailable(e.into()))?;

        let outcome = self
            .store
            .set_if_absent(&self.key(identity, code), &value, self.marker_ttl)
            .await?;
        Ok(match outcome {
            SetOutcome::Claimed => ClaimOutcome::Claimed,
            SetOutcome::AlreadyPresent => ClaimOutcome::AlreadyUsed,
        })
    }
}
