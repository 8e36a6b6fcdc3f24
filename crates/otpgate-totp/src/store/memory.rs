use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::clock::{Clock, SystemClock};
use crate::error::StoreError;

use super::{KeyValueStore, SetOutcome};

#[derive(Debug)]
struct Entry {
    value: Vec<u8>,
    expires_at: Option<DateTime<Utc>>,
}

impl Entry {
    fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_none_or(|at| at > now)
    }
}

/// In-process store. Clones share the same map.
///
/// Expiry is judged against the injected clock, so tests can move time forward
/// without sleeping. Every write sweeps expired entries, so keys that are only
/// ever written (used-code markers) do not accumulate.
#[derive(Debug, Clone)]
pub struct MemoryStore<C = SystemClock> {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
    clock: C,
}

impl MemoryStore<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for MemoryStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> MemoryStore<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Entry>>, StoreError> {
        self.entries
            .lock()
            .map_err(|_| StoreError::Unavailable(anyhow::anyhow!("memory store lock poisoned")))
    }

    fn expiry(&self, ttl: Option<Duration>) -> Option<DateTime<Utc>> {
        ttl.map(|ttl| {
            let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);
            self.clock
                .now()
                .checked_add_signed(ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC)
        })
    }

    /// Drop expired entries. Returns how many were removed.
    pub fn purge_expired(&self) -> Result<usize, StoreError> {
        let now = self.clock.now();
        let mut entries = self.lock()?;
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live(now));
        Ok(before - entries.len())
    }

    /// Number of live entries.
    pub fn len(&self) -> Result<usize, StoreError> {
        let now = self.clock.now();
        Ok(self.lock()?.values().filter(|e| e.is_live(now)).count())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl<C: Clock> KeyValueStore for MemoryStore<C> {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let now = self.clock.now();
        let mut entries = self.lock()?;
        match entries.get(key) {
            Some(entry) if entry.is_live(now) => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<(), StoreError> {
        let now = self.clock.now();
        let expires_at = self.expiry(ttl);
        let mut entries = self.lock()?;
        entries.retain(|_, entry| entry.is_live(now));
        entries.insert(
            key.to_owned(),
            Entry {
                value: value.to_vec(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn set_if_absent(
        &self,
        key: &str,
        value: &[u8],
        ttl: Duration,
    ) -> Result<SetOutcome, StoreError> {
        let now = self.clock.now();
        let expires_at = self.expiry(Some(ttl));
        // Sweep, check and insert under one guard.
        let mut entries = self.lock()?;
        entries.retain(|_, entry| entry.is_live(now));
        if entries.get(key).is_some_and(|entry| entry.is_live(now)) {
            return Ok(SetOutcome::AlreadyPresent);
        }
        entries.insert(
            key.to_owned(),
            Entry {
                value: value.to_vec(),
                expires_at,
            },
        );
        Ok(SetOutcome::Claimed)
    }
}
