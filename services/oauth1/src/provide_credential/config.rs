use crate::provide_credential::KeyFileCredentialProvider;
use crate::{Config, Credential};
use async_trait::async_trait;
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

        match (config.consumer_key, config.consumer_secret) {
            (Some(key), Some(secret)) => Ok(Some(Credential {
                consumer_key: key,
                consumer_secret: secret,
                token_secret: config.token_secret,
            })),
            // A configured key directory can stand in for the secret.
            (Some(key), None) => {
                let Some(key_path) = config.key_path else {
                    return Ok(None);
                };

                KeyFileCredentialProvider::new()
                    .with_key_path(&key_path)
                    .with_consumer_key(&key)
                    .provide_credential(ctx)
                    .await
            }
            // A secret with no key to present it under is a configuration
            // mistake, not a missing credential.
            (None, Some(_)) => Err(Error::config_invalid(
                "consumer secret is configured but the consumer key is missing",
            )),
            (None, None) => Ok(None),
        }
    }
}
