use crate::Credential;
use async_trait::async_trait;
use authsign_core::{Context, ProvideCredential, Result};

/// StaticCredentialProvider provides a fixed JWT credential.
///
/// This provider is used when you have the issuer and shared secret
/// directly and want to use them without any dynamic loading.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    issuer: String,
    secret: Vec<u8>,
    key_id: Option<String>,
}

impl StaticCredentialProvider {
    /// Create a new StaticCredentialProvider with issuer and raw secret
    /// bytes.
    pub fn new(issuer: &str, secret: &[u8]) -> Self {
        Self {
            issuer: issuer.to_string(),
            secret: secret.to_vec(),
            key_id: None,
        }
    }

    /// Set the key id sent in the token header.
    pub fn with_key_id(mut self, key_id: &str) -> Self {
        self.key_id = Some(key_id.to_string());
        self
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        Ok(Some(Credential {
            issuer: self.issuer.clone(),
            secret: self.secret.clone(),
            key_id: self.key_id.clone(),
        }))
    }
}
