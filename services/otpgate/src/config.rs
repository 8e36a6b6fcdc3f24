use std::time::Duration;

use serde::Deserialize;

use otpgate_core::config::Config;
use otpgate_totp::credential::DEFAULT_CREDENTIAL_PREFIX;
use otpgate_totp::replay::DEFAULT_USED_CODE_PREFIX;
use otpgate_totp::{CodeVerifier, SkewPolicy, TotpParams};

/// Service configuration loaded from environment variables.
///
/// Field names map to upper-cased env vars (`redis_url` → `REDIS_URL`).
#[derive(Debug, Deserialize)]
pub struct OtpgateConfig {
    /// Redis connection URL. Unset runs on the in-process store (development only).
    #[serde(default)]
    pub redis_url: Option<String>,
    /// TCP port to listen on (default 3112).
    #[serde(default = "default_port")]
    pub otpgate_port: u16,
    /// Issuer label embedded in provisioning URIs.
    #[serde(default = "default_issuer")]
    pub totp_issuer: String,
    #[serde(default = "default_step_secs")]
    pub totp_step_secs: u64,
    #[serde(default = "default_digits")]
    pub totp_digits: u32,
    /// Past steps accepted besides the current one.
    #[serde(default = "default_skew_back")]
    pub totp_skew_back: u32,
    /// Future steps accepted besides the current one.
    #[serde(default)]
    pub totp_skew_forward: u32,
    /// Used-code marker lifetime; raised to the acceptance window if shorter.
    #[serde(default = "default_marker_ttl_secs")]
    pub replay_marker_ttl_secs: u64,
    /// Credential lifetime. Unset keeps credentials until re-registration.
    #[serde(default)]
    pub credential_ttl_secs: Option<u64>,
    /// Upper bound for any single store call.
    #[serde(default = "default_store_timeout_ms")]
    pub store_timeout_ms: u64,
    #[serde(default = "default_credential_key_prefix")]
    pub credential_key_prefix: String,
    #[serde(default = "default_used_code_key_prefix")]
    pub used_code_key_prefix: String,
}

impl Config for OtpgateConfig {}

fn default_port() -> u16 {
    3112
}

fn default_issuer() -> String {
    "Secure App TOTP".to_owned()
}

fn default_step_secs() -> u64 {
    30
}

fn default_digits() -> u32 {
    6
}

fn default_skew_back() -> u32 {
    1
}

fn default_marker_ttl_secs() -> u64 {
    90
}

fn default_store_timeout_ms() -> u64 {
    500
}

fn default_credential_key_prefix() -> String {
    DEFAULT_CREDENTIAL_PREFIX.to_owned()
}

fn default_used_code_key_prefix() -> String {
    DEFAULT_USED_CODE_PREFIX.to_owned()
}

/// Runtime knobs derived from [`OtpgateConfig`].
#[derive(Debug, Clone)]
pub struct Settings {
    pub issuer: String,
    pub verifier: CodeVerifier,
    pub marker_ttl: Duration,
    pub credential_ttl: Option<Duration>,
    pub store_timeout: Duration,
    pub credential_prefix: String,
    pub used_code_prefix: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            issuer: default_issuer(),
            verifier: CodeVerifier::default(),
            marker_ttl: Duration::from_secs(default_marker_ttl_secs()),
            credential_ttl: None,
            store_timeout: Duration::from_millis(default_store_timeout_ms()),
            credential_prefix: default_credential_key_prefix(),
            used_code_prefix: default_used_code_key_prefix(),
        }
    }
}

impl From<&OtpgateConfig> for Settings {
    fn from(config: &OtpgateConfig) -> Self {
        let params = TotpParams {
            step_secs: config.totp_step_secs,
            digits: config.totp_digits,
            skew: SkewPolicy {
                back: config.totp_skew_back,
                forward: config.totp_skew_forward,
            },
        };
        Self {
            issuer: config.totp_issuer.clone(),
            verifier: CodeVerifier::new(params),
            marker_ttl: Duration::from_secs(config.replay_marker_ttl_secs),
            credential_ttl: config.credential_ttl_secs.map(Duration::from_secs),
            store_timeout: Duration::from_millis(config.store_timeout_ms),
            credential_prefix: config.credential_key_prefix.clone(),
            used_code_prefix: config.used_code_key_prefix.clone(),
        }
    }
}
