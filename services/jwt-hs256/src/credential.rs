use authsign_core::utils::Redact;
use authsign_core::SigningCredential;
use std::fmt::{Debug, Formatter};

/// Credential that holds the issuer and the shared HMAC secret.
#[derive(Default, Clone)]
pub struct Credential {
    /// Issuer, sent in clear as the `iss` claim. The verifier looks the
    /// shared secret up by this name.
    pub issuer: String,
    /// Shared secret bytes. Never leaves the signer.
    pub secret: Vec<u8>,
    /// Key id for the JWS `kid` header. Defaults to the issuer when unset.
    pub key_id: Option<String>,
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("issuer", &self.issuer)
            .field("secret", &Redact::from(&self.secret))
            .field("key_id", &self.key_id)
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.issuer.is_empty() && !self.secret.is_empty()
    }
}
