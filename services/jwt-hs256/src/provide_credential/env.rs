use crate::{constants::*, Credential};
use async_trait::async_trait;
use authsign_core::hash::base64_decode;
use authsign_core::{Context, Error, ProvideCredential, Result};

/// EnvCredentialProvider loads the JWT credential from environment
/// variables.
///
/// This provider looks for the following environment variables:
/// - `AUTHSIGN_JWT_ISSUER`: the issuer
/// - `AUTHSIGN_JWT_SECRET`: the base64-encoded shared secret
/// - `AUTHSIGN_JWT_KEY_ID`: the key id (optional)
#[derive(Debug, Default)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let envs = ctx.env_vars();

        let issuer = envs.get(AUTHSIGN_JWT_ISSUER);
        let secret = envs.get(AUTHSIGN_JWT_SECRET);

        match (issuer, secret) {
            (Some(issuer), Some(secret)) => {
                let secret = base64_decode(secret).map_err(|err| {
                    Error::credential_invalid(format!(
                        "{AUTHSIGN_JWT_SECRET} is not valid base64"
                    ))
                    .with_source(err)
                })?;

                Ok(Some(Credential {
                    issuer: issuer.clone(),
                    secret,
                    key_id: envs.get(AUTHSIGN_JWT_KEY_ID).cloned(),
                }))
            }
            _ => Ok(None),
        }
    }
}
