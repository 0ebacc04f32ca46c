use crate::{constants::*, Credential};
use async_trait::async_trait;
use authsign_core::hash::base64url_decode;
use authsign_core::{Context, Error, ProvideCredential, Result};
use log::debug;
use serde::Deserialize;

/// Symmetric JSON Web Key, RFC 7518 section 6.4. The key bytes live in `k`
/// as base64url without padding.
#[derive(Debug, Deserialize)]
struct Jwk {
    kty: String,
    k: String,
    #[serde(default)]
    kid: Option<String>,
}

/// JwkFileCredentialProvider loads the shared secret from a symmetric JSON
/// Web Key file.
///
/// Both the file path and the issuer fall back to the
/// `AUTHSIGN_JWT_JWK_PATH` and `AUTHSIGN_JWT_ISSUER` environment variables
/// when unset. The `kid` of the key, if present, becomes the token's key
/// id.
#[derive(Debug, Clone, Default)]
pub struct JwkFileCredentialProvider {
    key_path: Option<String>,
    issuer: Option<String>,
}

impl JwkFileCredentialProvider {
    /// Create a new JwkFileCredentialProvider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the JWK file path.
    pub fn with_key_path(mut self, key_path: &str) -> Self {
        self.key_path = Some(key_path.to_string());
        self
    }

    /// Set the issuer claimed in tokens signed with this key.
    pub fn with_issuer(mut self, issuer: &str) -> Self {
        self.issuer = Some(issuer.to_string());
        self
    }
}

#[async_trait]
impl ProvideCredential for JwkFileCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let Some(key_path) = self
            .key_path
            .clone()
            .or_else(|| ctx.env_var(AUTHSIGN_JWT_JWK_PATH))
        else {
            return Ok(None);
        };
        let Some(issuer) = self
            .issuer
            .clone()
            .or_else(|| ctx.env_var(AUTHSIGN_JWT_ISSUER))
        else {
            return Ok(None);
        };

        let content = match ctx.file_read_as_string(&key_path).await {
            Ok(v) => v,
            Err(err) => {
                debug!("no JWK file at {key_path}: {err}");
                return Ok(None);
            }
        };

        let jwk: Jwk = serde_json::from_str(&content).map_err(|err| {
            Error::credential_invalid(format!("{key_path} is not a valid JSON Web Key"))
                .with_source(err)
        })?;

        if jwk.kty != "oct" {
            return Err(Error::credential_invalid(format!(
                "only symmetric (oct) keys can sign HS256 tokens, {key_path} has kty {}",
                jwk.kty
            )));
        }

        let secret = base64url_decode(&jwk.k)
            .map_err(|err| Error::credential_invalid("JWK `k` is not valid base64url").with_source(err))?;

        Ok(Some(Credential {
            issuer,
            secret,
            key_id: jwk.kid,
        }))
    }
}
