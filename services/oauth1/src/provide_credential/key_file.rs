use crate::{constants::*, Credential};
use async_trait::async_trait;
use authsign_core::{Context, ProvideCredential, Result};
use log::debug;

/// KeyFileCredentialProvider loads the consumer secret from a key
/// directory holding one secret file per consumer key.
///
/// The file at `<key_path>/<consumer_key>` holds the secret. Both the key
/// path and the consumer key fall back to the `AUTHSIGN_OAUTH1_KEY_PATH`
/// and `AUTHSIGN_OAUTH1_CONSUMER_KEY` environment variables when unset.
#[derive(Debug, Clone, Default)]
pub struct KeyFileCredentialProvider {
    key_path: Option<String>,
    consumer_key: Option<String>,
}

impl KeyFileCredentialProvider {
    /// Create a new KeyFileCredentialProvider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the key directory.
    pub fn with_key_path(mut self, key_path: &str) -> Self {
        self.key_path = Some(key_path.to_string());
        self
    }

    /// Set the consumer key naming the secret file.
    pub fn with_consumer_key(mut self, consumer_key: &str) -> Self {
        self.consumer_key = Some(consumer_key.to_string());
        self
    }
}

#[async_trait]
impl ProvideCredential for KeyFileCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let Some(key_path) = self
            .key_path
            .clone()
            .or_else(|| ctx.env_var(AUTHSIGN_OAUTH1_KEY_PATH))
        else {
            return Ok(None);
        };
        let Some(consumer_key) = self
            .consumer_key
            .clone()
            .or_else(|| ctx.env_var(AUTHSIGN_OAUTH1_CONSUMER_KEY))
        else {
            return Ok(None);
        };

        let path = format!("{key_path}/{consumer_key}");
        let secret = match ctx.file_read_as_string(&path).await {
            Ok(v) => v,
            Err(err) => {
                debug!("no key file at {path}: {err}");
                return Ok(None);
            }
        };

        // Key files routinely end with a trailing newline.
        let secret = secret.trim_end().to_string();
        if secret.is_empty() {
            return Ok(None);
        }

        Ok(Some(Credential {
            consumer_key,
            consumer_secret: secret,
            token_secret: ctx.env_var(AUTHSIGN_OAUTH1_TOKEN_SECRET),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use authsign_file_read_tokio::TokioFileRead;
    use std::io::Write;

    #[tokio::test]
    async fn test_key_file_credential_provider() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let mut f = std::fs::File::create(dir.path().join("test-key"))?;
        writeln!(f, "super-insecure-secret")?;

        let ctx = Context::default().with_file_read(TokioFileRead);
        let provider = KeyFileCredentialProvider::new()
            .with_key_path(dir.path().to_str().unwrap())
            .with_consumer_key("test-key");

        let cred = provider.provide_credential(&ctx).await?.unwrap();
        assert_eq!(cred.consumer_key, "test-key");
        assert_eq!(cred.consumer_secret, "super-insecure-secret");

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_key_file_yields_none() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;

        let ctx = Context::default().with_file_read(TokioFileRead);
        let provider = KeyFileCredentialProvider::new()
            .with_key_path(dir.path().to_str().unwrap())
            .with_consumer_key("unknown-key");

        let cred = provider.provide_credential(&ctx).await?;
        assert!(cred.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_unconfigured_provider_yields_none() -> anyhow::Result<()> {
        let cred = KeyFileCredentialProvider::new()
            .provide_credential(&Context::default())
            .await?;
        assert!(cred.is_none());

        Ok(())
    }
}
