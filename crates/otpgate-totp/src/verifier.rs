//! RFC 6238 time-based codes with a bounded skew window.

use std::time::Duration;

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use subtle::{Choice, ConstantTimeEq};

use crate::error::TotpError;
use crate::secret::Secret;

type HmacSha1 = Hmac<Sha1>;

/// Which steps around the current one are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkewPolicy {
    /// Steps accepted before the current one.
    pub back: u32,
    /// Steps accepted after the current one.
    pub forward: u32,
}

impl SkewPolicy {
    /// Accept `n` steps on either side.
    pub fn symmetric(n: u32) -> Self {
        Self { back: n, forward: n }
    }
}

impl Default for SkewPolicy {
    /// Current step plus the one before it.
    fn default() -> Self {
        Self {
            back: 1,
            forward: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TotpParams {
    pub step_secs: u64,
    pub digits: u32,
    pub skew: SkewPolicy,
}

impl Default for TotpParams {
    fn default() -> Self {
        Self {
            step_secs: 30,
            digits: 6,
            skew: SkewPolicy::default(),
        }
    }
}

/// Stateless TOTP checker. Cheap to clone and safe to share across tasks.
#[derive(Debug, Clone, Copy)]
pub struct CodeVerifier {
    params: TotpParams,
}

impl Default for CodeVerifier {
    fn default() -> Self {
        Self::new(TotpParams::default())
    }
}

impl CodeVerifier {
    /// `step_secs` is raised to 1 and `digits` clamped to 6..=9.
    pub fn new(params: TotpParams) -> Self {
        Self {
            params: TotpParams {
                step_secs: params.step_secs.max(1),
                digits: params.digits.clamp(6, 9),
                skew: params.skew,
            },
        }
    }

    pub fn params(&self) -> &TotpParams {
        &self.params
    }

    /// Time step containing `at`, or `None` before the epoch.
    pub fn step_at(&self, at: DateTime<Utc>) -> Option<u64> {
        u64::try_from(at.timestamp())
            .ok()
            .map(|secs| secs / self.params.step_secs)
    }

    /// How long a single code can keep validating, from the first moment it is accepted.
    pub fn replay_horizon(&self) -> Duration {
        let steps = u64::from(self.params.skew.back) + u64::from(self.params.skew.forward) + 1;
        Duration::from_secs(self.params.step_secs.saturating_mul(steps))
    }

    /// RFC 4226 HOTP value before reduction to `digits`.
    pub fn hotp(key: &[u8], counter: u64) -> Result<u32, TotpError> {
        let mut mac =
            <HmacSha1 as Mac>::new_from_slice(key).map_err(|_| TotpError::InvalidSecret)?;
        mac.update(&counter.to_be_bytes());
        let digest = mac.finalize().into_bytes();

        let offset = usize::from(digest[digest.len() - 1] & 0x0f);
        let binary = u32::from_be_bytes([
            digest[offset] & 0x7f,
            digest[offset + 1],
            digest[offset + 2],
            digest[offset + 3],
        ]);
        Ok(binary)
    }

    fn code_for_step(&self, key: &[u8], step: u64) -> Result<String, TotpError> {
        let value = Self::hotp(key, step)? % 10u32.pow(self.params.digits);
        Ok(format!("{:0width$}", value, width = self.params.digits as usize))
    }

    /// Code an authenticator would display at `at`. Instants before the epoch use step 0.
    pub fn generate(&self, secret: &Secret, at: DateTime<Utc>) -> Result<String, TotpError> {
        let key = secret.to_bytes()?;
        self.code_for_step(&key, self.step_at(at).unwrap_or(0))
    }

    /// Strip the separators authenticator apps show and check the shape.
    pub fn normalize_code(&self, raw: &str) -> Result<String, TotpError> {
        let code: String = raw
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect();
        if code.len() != self.params.digits as usize || !code.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(TotpError::InvalidCodeFormat);
        }
        Ok(code)
    }

    /// Check `code` against every step in the skew window around `at`.
    ///
    /// Returns the matching step, or `None` when the code is wrong for the whole
    /// window. Every candidate is compared, so timing does not reveal which one hit.
    pub fn verify(
        &self,
        secret: &Secret,
        code: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<u64>, TotpError> {
        let code = self.normalize_code(code)?;
        let key = secret.to_bytes()?;
        let Some(current) = self.step_at(at) else {
            return Ok(None);
        };

        let first = current.saturating_sub(u64::from(self.params.skew.back));
        let last = current.saturating_add(u64::from(self.params.skew.forward));

        let mut matched: Option<u64> = None;
        for step in first..=last {
            let expected = self.code_for_step(&key, step)?;
            let hit: Choice = expected.as_bytes().ct_eq(code.as_bytes());
            if bool::from(hit) && matched.is_none() {
                matched = Some(step);
            }
        }
        Ok(matched)
    }
}
