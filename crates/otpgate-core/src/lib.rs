//! Service plumbing shared by otpgate binaries.
//!
//! Nothing in here knows about TOTP. Tracing setup, env config loading, health
//! probes, request ids and serde helpers only.

pub mod config;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
