use crate::Credential;
use async_trait::async_trait;
use authsign_core::{Context, ProvideCredential, Result};

/// StaticCredentialProvider provides a fixed OAuth 1.0a credential.
///
/// This provider is used when you have the consumer key and secret directly
/// and want to use them without any dynamic loading.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    consumer_key: String,
    consumer_secret: String,
    token_secret: Option<String>,
}

impl StaticCredentialProvider {
    /// Create a new StaticCredentialProvider with consumer key and secret.
    pub fn new(consumer_key: &str, consumer_secret: &str) -> Self {
        Self {
            consumer_key: consumer_key.to_string(),
            consumer_secret: consumer_secret.to_string(),
            token_secret: None,
        }
    }

    /// Set the token secret for three-legged flows.
    pub fn with_token_secret(mut self, token_secret: &str) -> Self {
        self.token_secret = Some(token_secret.to_string());
        self
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        Ok(Some(Credential {
            consumer_key: self.consumer_key.clone(),
            consumer_secret: self.consumer_secret.clone(),
            token_secret: self.token_secret.clone(),
        }))
    }
}
