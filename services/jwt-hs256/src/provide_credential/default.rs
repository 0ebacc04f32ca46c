use crate::provide_credential::{EnvCredentialProvider, JwkFileCredentialProvider};
use crate::Credential;
use async_trait::async_trait;
use authsign_core::{Context, ProvideCredential, ProvideCredentialChain, Result};

/// DefaultCredentialProvider is a loader that will try to load the
/// credential via the default chain.
///
/// Resolution order:
///
/// 1. Environment variables
/// 2. Symmetric JSON Web Key file
#[derive(Debug)]
pub struct DefaultCredentialProvider {
    chain: ProvideCredentialChain<Credential>,
}

impl Default for DefaultCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultCredentialProvider {
    /// Create a new `DefaultCredentialProvider` instance.
    pub fn new() -> Self {
        let chain = ProvideCredentialChain::new()
            .push(EnvCredentialProvider::new())
            .push(JwkFileCredentialProvider::new());

        Self { chain }
    }

    /// Create with a custom credential chain.
    pub fn with_chain(chain: ProvideCredentialChain<Credential>) -> Self {
        Self { chain }
    }

    /// Add a credential provider to the front of the default chain.
    pub fn push_front(
        mut self,
        provider: impl ProvideCredential<Credential = Credential> + 'static,
    ) -> Self {
        self.chain = self.chain.push_front(provider);
        self
    }
}

#[async_trait]
impl ProvideCredential for DefaultCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        self.chain.provide_credential(ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::StaticCredentialProvider;
    use authsign_core::StaticEnv;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_default_loader_without_env() {
        let _ = env_logger::builder().is_test(true).try_init();

        let ctx = Context::default().with_env(StaticEnv {
            envs: HashMap::new(),
        });

        let loader = DefaultCredentialProvider::new();
        let credential = loader.provide_credential(&ctx).await.unwrap();

        assert!(credential.is_none());
    }

    #[tokio::test]
    async fn test_default_loader_with_env() {
        let _ = env_logger::builder().is_test(true).try_init();

        let ctx = Context::default().with_env(StaticEnv {
            envs: HashMap::from_iter([
                (AUTHSIGN_JWT_ISSUER.to_string(), "test-issuer".to_string()),
                // base64 of "test-secret"
                (AUTHSIGN_JWT_SECRET.to_string(), "dGVzdC1zZWNyZXQ=".to_string()),
            ]),
        });

        let loader = DefaultCredentialProvider::new();
        let credential = loader.provide_credential(&ctx).await.unwrap().unwrap();

        assert_eq!("test-issuer", credential.issuer);
        assert_eq!(b"test-secret".to_vec(), credential.secret);
    }

    #[tokio::test]
    async fn test_push_front_wins() {
        let ctx = Context::default().with_env(StaticEnv {
            envs: HashMap::from_iter([
                (AUTHSIGN_JWT_ISSUER.to_string(), "env-issuer".to_string()),
                (AUTHSIGN_JWT_SECRET.to_string(), "ZW52LXNlY3JldA==".to_string()),
            ]),
        });

        let loader = DefaultCredentialProvider::new()
            .push_front(StaticCredentialProvider::new("static-issuer", b"static-secret"));
        let credential = loader.provide_credential(&ctx).await.unwrap().unwrap();

        assert_eq!("static-issuer", credential.issuer);
    }
}
