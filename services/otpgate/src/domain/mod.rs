pub mod provisioning;
pub mod types;
