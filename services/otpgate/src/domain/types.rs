use chrono::{DateTime, Utc};

use otpgate_totp::{Identity, Secret};

/// Material handed back to a freshly registered identity.
#[derive(Debug, Clone)]
pub struct Registration {
    pub identity: Identity,
    pub secret: Secret,
    pub provisioning_uri: String,
    pub created_at: DateTime<Utc>,
}

/// A verification that passed both the code check and the single-use claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acceptance {
    pub identity: Identity,
    /// Time step the submitted code belongs to.
    pub step: u64,
}
