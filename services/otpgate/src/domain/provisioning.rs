use url::Url;

use otpgate_totp::{Identity, Secret, TotpParams};

/// Build the `otpauth://` URI authenticator apps import.
///
/// The `issuer:identity` label is a single percent-encoded path segment.
pub fn provisioning_uri(
    issuer: &str,
    identity: &Identity,
    secret: &Secret,
    params: &TotpParams,
) -> anyhow::Result<String> {
    let mut uri = Url::parse("otpauth://totp/")?;
    uri.path_segments_mut()
        .map_err(|()| anyhow::anyhow!("otpauth URI cannot carry a path"))?
        .pop_if_empty()
        .push(&format!("{issuer}:{identity}"));
    uri.query_pairs_mut()
        .append_pair("secret", secret.as_str())
        .append_pair("issuer", issuer)
        .append_pair("algorithm", "SHA1")
        .append_pair("digits", &params.digits.to_string())
        .append_pair("period", &params.step_secs.to_string());
    Ok(uri.into())
}
