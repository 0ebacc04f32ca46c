use authsign_core::utils::Redact;
use authsign_core::SigningCredential;
use std::fmt::{Debug, Formatter};

/// Credential that holds the OAuth 1.0a consumer key and secrets.
///
/// The token secret is only populated in a three-legged flow. Two-legged
/// signing leaves it `None`, which signs with an empty token-secret half.
#[derive(Default, Clone)]
pub struct Credential {
    /// Consumer key, sent in clear as `oauth_consumer_key`.
    pub consumer_key: String,
    /// Consumer secret. Never leaves the signer.
    pub consumer_secret: String,
    /// Token secret for three-legged flows.
    pub token_secret: Option<String>,
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &Redact::from(&self.consumer_secret))
            .field("token_secret", &Redact::from(&self.token_secret))
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.consumer_key.is_empty() && !self.consumer_secret.is_empty()
    }
}
