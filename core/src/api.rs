use crate::{Context, Result};
use std::fmt::Debug;
use std::time::Duration;

/// SigningCredential is the trait used by the signer as the signing key.
pub trait SigningCredential: Clone + Debug + Send + Sync + Unpin + 'static {
    /// Check if the credential is still valid for signing.
    fn is_valid(&self) -> bool;
}

impl<T: SigningCredential> SigningCredential for Option<T> {
    fn is_valid(&self) -> bool {
        let Some(cred) = self else {
            return false;
        };

        cred.is_valid()
    }
}

/// ProvideCredential is the trait used by the signer to load the credential
/// from the environment.
///
/// Schemes require different credentials to sign requests. OAuth 1.0a
/// requires a consumer key and secret, while a JWT bearer scheme requires an
/// issuer and a shared secret.
#[async_trait::async_trait]
pub trait ProvideCredential: Debug + Send + Sync + Unpin + 'static {
    /// Credential returned by this provider.
    type Credential: Send + Sync + Unpin + 'static;

    /// Load credential from the current env.
    ///
    /// - Returns `Ok(None)` if this provider finds nothing, allowing the
    ///   next provider in a chain to take over.
    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>>;
}

/// SignRequest is the trait used by the signer to attach an authorization
/// credential to the pending request.
#[async_trait::async_trait]
pub trait SignRequest: Debug + Send + Sync + Unpin + 'static {
    /// Credential used by this builder.
    type Credential: Send + Sync + Unpin + 'static;

    /// Sign the request in place.
    ///
    /// ## Credential
    ///
    /// The `credential` parameter carries the secret material required to
    /// sign the request. Implementations decide how to handle a missing
    /// credential.
    ///
    /// ## Expires In
    ///
    /// The `expires_in` parameter specifies the validity window for the
    /// result. If the scheme does not support expiration, it should return
    /// an error.
    async fn sign_request(
        &self,
        ctx: &Context,
        req: &mut http::request::Parts,
        credential: Option<&Self::Credential>,
        expires_in: Option<Duration>,
    ) -> Result<()>;
}
