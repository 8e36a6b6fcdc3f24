use std::fmt;

use base32::Alphabet;
use rand::RngExt;
use serde::{Deserialize, Serialize};

use crate::error::TotpError;

/// Raw secret length in bytes (160 bits, the RFC 4226 recommendation for SHA1).
pub const SECRET_LEN: usize = 20;

const ALPHABET: Alphabet = Alphabet::RFC4648 { padding: false };

/// Shared TOTP secret in unpadded upper-case base32.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Secret(String);

impl Secret {
    /// Normalize and validate a base32 secret as typed or copied by a user.
    pub fn parse(raw: &str) -> Result<Self, TotpError> {
        let normalized: String = raw
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '=' && *c != '-')
            .map(|c| c.to_ascii_uppercase())
            .collect();

        if normalized.is_empty() || !normalized.chars().all(is_base32_char) {
            return Err(TotpError::InvalidSecret);
        }
        match base32::decode(ALPHABET, &normalized) {
            Some(bytes) if !bytes.is_empty() => Ok(Self(normalized)),
            _ => Err(TotpError::InvalidSecret),
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(base32::encode(ALPHABET, bytes))
    }

    /// Decoded HMAC key.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TotpError> {
        base32::decode(ALPHABET, &self.0)
            .filter(|bytes| !bytes.is_empty())
            .ok_or(TotpError::InvalidSecret)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_base32_char(c: char) -> bool {
    c.is_ascii_uppercase() || ('2'..='7').contains(&c)
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

impl TryFrom<String> for Secret {
    type Error = TotpError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Secret> for String {
    fn from(secret: Secret) -> Self {
        secret.0
    }
}

/// Issues fresh secrets for newly registered identities.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecretProvisioner;

impl SecretProvisioner {
    /// Draw [`SECRET_LEN`] bytes from the thread-local CSPRNG.
    pub fn generate_secret(&self) -> Secret {
        let bytes: [u8; SECRET_LEN] = rand::rng().random();
        Secret::from_bytes(&bytes)
    }
}
