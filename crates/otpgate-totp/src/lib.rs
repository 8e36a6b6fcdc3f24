//! TOTP verification core.
//!
//! Pure building blocks for second-factor verification: secret provisioning,
//! RFC 6238 code checking with bounded skew, and single-use enforcement on top
//! of an abstract key-value store. No HTTP, no process configuration.

pub mod clock;
pub mod credential;
pub mod error;
pub mod identity;
pub mod replay;
pub mod secret;
pub mod store;
pub mod verifier;

pub use clock::{Clock, ManualClock, SystemClock};
pub use credential::{Credential, CredentialStore, UsedCodeMarker};
pub use error::{StoreError, TotpError};
pub use identity::Identity;
pub use replay::{ClaimOutcome, ReplayGuard};
pub use secret::{Secret, SecretProvisioner};
pub use store::{Deadline, KeyValueStore, MemoryStore, SetOutcome};
pub use verifier::{CodeVerifier, SkewPolicy, TotpParams};
