#![allow(async_fn_in_trait)]

//! Key-value contract the verification core persists through.

mod deadline;
mod memory;

use std::time::Duration;

use crate::error::StoreError;

pub use deadline::Deadline;
pub use memory::MemoryStore;

/// Result of a conditional write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    /// The key was absent and now holds the value.
    Claimed,
    /// A live value already existed; nothing was written.
    AlreadyPresent,
}

/// Byte-oriented store with per-key expiry.
///
/// `set_if_absent` must be a single atomic operation on the backend. Composing it
/// from `get` followed by `set` lets two concurrent callers both win.
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Unconditional write. `None` keeps the value until overwritten.
    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<(), StoreError>;

    async fn set_if_absent(
        &self,
        key: &str,
        value: &[u8],
        ttl: Duration,
    ) -> Result<SetOutcome, StoreError>;
}
