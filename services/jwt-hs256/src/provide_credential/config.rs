use crate::provide_credential::JwkFileCredentialProvider;
use crate::{Config, Credential};
use async_trait::async_trait;
use authsign_core::hash::base64_decode;
use authsign_core::{Context, Error, ProvideCredential, Result};
use std::sync::Arc;

/// ConfigCredentialProvider loads the credential from a [`Config`],
/// falling back to environment variables for unset fields.
#[derive(Debug, Clone)]
pub struct ConfigCredentialProvider {
    config: Arc<Config>,
}

impl ConfigCredentialProvider {
    /// Create a new ConfigCredentialProvider.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

impl From<Config> for ConfigCredentialProvider {
    fn from(config: Config) -> Self {
        Self::new(Arc::new(config))
    }
}

#[async_trait]
impl ProvideCredential for ConfigCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let config = self.config.as_ref().clone().from_env(ctx);

        match (config.issuer, config.secret) {
            (Some(issuer), Some(secret)) => {
                let secret = base64_decode(&secret).map_err(|err| {
                    Error::credential_invalid("configured secret is not valid base64")
                        .with_source(err)
                })?;

                Ok(Some(Credential {
                    issuer,
                    secret,
                    key_id: config.key_id,
                }))
            }
            // A configured JWK file can stand in for the secret.
            (Some(issuer), None) => {
                let Some(key_path) = config.key_path else {
                    return Ok(None);
                };

                JwkFileCredentialProvider::new()
                    .with_key_path(&key_path)
                    .with_issuer(&issuer)
                    .provide_credential(ctx)
                    .await
            }
            // A secret with no issuer to claim it under is a configuration
            // mistake, not a missing credential.
            (None, Some(_)) => Err(Error::config_invalid(
                "secret is configured but the issuer is missing",
            )),
            (None, None) => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use authsign_core::StaticEnv;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_explicit_fields_win_over_env() -> anyhow::Result<()> {
        let envs = HashMap::from([
            (AUTHSIGN_JWT_ISSUER.to_string(), "env-issuer".to_string()),
            // base64 of "env-secret"
            (AUTHSIGN_JWT_SECRET.to_string(), "ZW52LXNlY3JldA==".to_string()),
        ]);
        let ctx = Context::default().with_env(StaticEnv { envs });

        let provider: ConfigCredentialProvider = Config {
            issuer: Some("explicit-issuer".to_string()),
            ..Default::default()
        }
        .into();

        let cred = provider.provide_credential(&ctx).await?.unwrap();
        assert_eq!(cred.issuer, "explicit-issuer");
        assert_eq!(cred.secret, b"env-secret");

        Ok(())
    }

    #[tokio::test]
    async fn test_key_path_stands_in_for_secret() -> anyhow::Result<()> {
        use authsign_file_read_tokio::TokioFileRead;
        use std::io::Write;

        let dir = tempfile::tempdir()?;
        let path = dir.path().join("signing.jwk");
        let mut f = std::fs::File::create(&path)?;
        // k is base64url of "file-secret"
        write!(f, r#"{{"kty":"oct","k":"ZmlsZS1zZWNyZXQ"}}"#)?;

        let ctx = Context::default().with_file_read(TokioFileRead);
        let provider: ConfigCredentialProvider = Config {
            issuer: Some("test-issuer".to_string()),
            key_path: Some(path.to_str().unwrap().to_string()),
            ..Default::default()
        }
        .into();

        let cred = provider.provide_credential(&ctx).await?.unwrap();
        assert_eq!(cred.secret, b"file-secret");

        Ok(())
    }

    #[tokio::test]
    async fn test_incomplete_config_yields_none() -> anyhow::Result<()> {
        let provider: ConfigCredentialProvider = Config::default().into();
        let cred = provider.provide_credential(&Context::default()).await?;
        assert!(cred.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_secret_without_issuer_is_config_error() {
        use authsign_core::ErrorKind;

        let provider: ConfigCredentialProvider = Config {
            // base64 of "orphan-secret"
            secret: Some("b3JwaGFuLXNlY3JldA==".to_string()),
            ..Default::default()
        }
        .into();

        let err = provider
            .provide_credential(&Context::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }
}
