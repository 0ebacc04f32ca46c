use crate::{constants::*, Credential};
use async_trait::async_trait;
use authsign_core::{Context, ProvideCredential, Result};

/// EnvCredentialProvider loads the OAuth 1.0a credential from environment
/// variables.
///
/// This provider looks for the following environment variables:
/// - `AUTHSIGN_OAUTH1_CONSUMER_KEY`: the consumer key
/// - `AUTHSIGN_OAUTH1_CONSUMER_SECRET`: the consumer secret
/// - `AUTHSIGN_OAUTH1_TOKEN_SECRET`: the token secret (optional)
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

        let consumer_key = envs.get(AUTHSIGN_OAUTH1_CONSUMER_KEY);
        let consumer_secret = envs.get(AUTHSIGN_OAUTH1_CONSUMER_SECRET);

        match (consumer_key, consumer_secret) {
            (Some(key), Some(secret)) => Ok(Some(Credential {
                consumer_key: key.clone(),
                consumer_secret: secret.clone(),
                token_secret: envs.get(AUTHSIGN_OAUTH1_TOKEN_SECRET).cloned(),
            })),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use authsign_core::StaticEnv;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_env_credential_provider() -> anyhow::Result<()> {
        let envs = HashMap::from([
            (
                AUTHSIGN_OAUTH1_CONSUMER_KEY.to_string(),
                "test-key".to_string(),
            ),
            (
                AUTHSIGN_OAUTH1_CONSUMER_SECRET.to_string(),
                "test-secret".to_string(),
            ),
        ]);
        let ctx = Context::default().with_env(StaticEnv { envs });

        let cred = EnvCredentialProvider::new()
            .provide_credential(&ctx)
            .await?
            .unwrap();
        assert_eq!(cred.consumer_key, "test-key");
        assert_eq!(cred.consumer_secret, "test-secret");
        assert!(cred.token_secret.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_env_credential_provider_partial() -> anyhow::Result<()> {
        let envs = HashMap::from([(
            AUTHSIGN_OAUTH1_CONSUMER_KEY.to_string(),
            "test-key".to_string(),
        )]);
        let ctx = Context::default().with_env(StaticEnv { envs });

        let cred = EnvCredentialProvider::new().provide_credential(&ctx).await?;
        assert!(cred.is_none());

        Ok(())
    }
}
