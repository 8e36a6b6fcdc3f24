/// Input errors raised by the pure verification components.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TotpError {
    #[error("identity must not be empty")]
    EmptyIdentity,
    #[error("invalid secret")]
    InvalidSecret,
    #[error("invalid code format")]
    InvalidCodeFormat,
}

/// Failures of the backing key-value store. Always retryable from the caller's view.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(#[from] anyhow::Error),
    #[error("store call exceeded its deadline")]
    Timeout,
}
