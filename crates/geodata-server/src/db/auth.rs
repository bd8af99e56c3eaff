//! RDS IAM authentication token generation.
//!
//! An IAM authentication token is a SigV4-presigned `rds-db` connect
//! request, used in place of a static database password. Tokens are valid
//! for 15 minutes; callers are expected to mint a fresh one per connection
//! attempt.

use std::time::{Duration, SystemTime};

use anyhow::{Context, Result};
use aws_config::BehaviorVersion;
use aws_credential_types::provider::ProvideCredentials;
use aws_sigv4::http_request::{
    sign, SignableBody, SignableRequest, SignatureLocation, SigningSettings,
};
use aws_sigv4::sign::v4;

/// Token lifetime imposed by RDS.
const TOKEN_EXPIRY: Duration = Duration::from_secs(900);

/// Generate an RDS IAM authentication token for the given endpoint.
///
/// Credentials are resolved through the standard AWS chain (environment,
/// `~/.aws/credentials`, instance metadata). When `profile` is set, that
/// named profile is used instead of the chain's default.
pub async fn build_auth_token(
    host: &str,
    port: u16,
    user: &str,
    region: &str,
    profile: Option<&str>,
) -> Result<String> {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(profile) = profile {
        loader = loader.profile_name(profile);
    }
    let sdk_config = loader.load().await;

    let credentials = sdk_config
        .credentials_provider()
        .context("no AWS credentials provider configured")?
        .provide_credentials()
        .await
        .context("failed to resolve AWS credentials")?;
    let identity = credentials.into();

    let mut settings = SigningSettings::default();
    settings.expires_in = Some(TOKEN_EXPIRY);
    settings.signature_location = SignatureLocation::QueryParams;

    let signing_params = v4::SigningParams::builder()
        .identity(&identity)
        .region(region)
        .name("rds-db")
        .time(SystemTime::now())
        .settings(settings)
        .build()
        .context("failed to build signing parameters")?;

    let endpoint = format!("https://{host}:{port}/?Action=connect&DBUser={user}");
    let signable = SignableRequest::new(
        "GET",
        &endpoint,
        std::iter::empty(),
        SignableBody::Bytes(&[]),
    )
    .context("failed to build signable request")?;

    let (instructions, _signature) = sign(signable, &signing_params.into())
        .context("failed to sign token request")?
        .into_parts();

    let mut signed = url::Url::parse(&endpoint).context("failed to parse endpoint url")?;
    for (name, value) in instructions.params() {
        signed.query_pairs_mut().append_pair(name, value);
    }

    // The token is the signed URL with the scheme stripped.
    let mut token = signed.to_string();
    Ok(token.split_off("https://".len()))
}
