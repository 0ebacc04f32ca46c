use crate::constants::{DEFAULT_LEEWAY, DEFAULT_VALIDITY};
use crate::credential::Credential;
use async_trait::async_trait;
use authsign_core::time::{now, unix_timestamp, DateTime};
use authsign_core::{Context, Error, Result, SignRequest};
use http::header::AUTHORIZATION;
use http::HeaderValue;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use log::debug;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Registered claims carried by every issued token.
///
/// All three instants are unix timestamps in seconds and always order as
/// `nbf < iat < exp`: not-before is back-dated by the skew leeway, and
/// expiry sits one validity window after issuance.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct JwtClaims {
    /// Issuer the verifier uses to look up the shared secret.
    pub iss: String,
    /// Token id, fresh per token so the verifier can reject replays.
    pub jti: String,
    /// Issued-at.
    pub iat: u64,
    /// Not-before.
    pub nbf: u64,
    /// Expiry.
    pub exp: u64,
}

/// RequestSigner that issues a short-lived HS256 bearer token.
#[derive(Debug)]
pub struct RequestSigner {
    validity: Duration,
    leeway: Duration,
    time: Option<DateTime>,
    token_id: Option<String>,
}

impl Default for RequestSigner {
    fn default() -> Self {
        Self {
            validity: DEFAULT_VALIDITY,
            leeway: DEFAULT_LEEWAY,
            time: None,
            token_id: None,
        }
    }
}

impl RequestSigner {
    /// Create a new JWT HS256 signer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the default validity window of issued tokens.
    ///
    /// A per-request `expires_in` passed to [`Signer::sign`] takes
    /// precedence over this value.
    ///
    /// [`Signer::sign`]: authsign_core::Signer::sign
    pub fn with_validity(mut self, validity: Duration) -> Self {
        self.validity = validity;
        self
    }

    /// Override the clock-skew leeway used to back-date `nbf`.
    pub fn with_leeway(mut self, leeway: Duration) -> Self {
        self.leeway = leeway;
        self
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Specify the token id.
    ///
    /// # Note
    ///
    /// Token ids must be drawn fresh per token to let verifiers reject
    /// replays. Only use this function for testing.
    #[cfg(test)]
    pub fn with_token_id(mut self, token_id: &str) -> Self {
        self.token_id = Some(token_id.to_string());
        self
    }

    fn get_time(&self) -> DateTime {
        self.time.unwrap_or_else(now)
    }

    fn get_token_id(&self) -> String {
        self.token_id.clone().unwrap_or_else(random_token_id)
    }

    fn build_claims(&self, issuer: &str, validity: Duration) -> Result<JwtClaims> {
        let iat = unix_timestamp(self.get_time())?;
        let exp = iat.checked_add(validity.as_secs()).ok_or_else(|| {
            Error::request_invalid("token validity window overflows the expiry timestamp")
        })?;

        Ok(JwtClaims {
            iss: issuer.to_string(),
            jti: self.get_token_id(),
            iat,
            nbf: iat.saturating_sub(self.leeway.as_secs()),
            exp,
        })
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _ctx: &Context,
        req: &mut http::request::Parts,
        credential: Option<&Self::Credential>,
        expires_in: Option<Duration>,
    ) -> Result<()> {
        let Some(cred) = credential else {
            return Ok(());
        };

        if cred.secret.is_empty() {
            return Err(Error::credential_invalid("shared secret is empty, cannot sign"));
        }

        let validity = expires_in.unwrap_or(self.validity);
        if validity.as_secs() == 0 {
            return Err(Error::request_invalid("token validity window must be positive"));
        }

        let claims = self.build_claims(&cred.issuer, validity)?;
        debug!(
            "issuing token for {}: jti={}, exp={}",
            claims.iss, claims.jti, claims.exp
        );

        let mut header = Header::new(Algorithm::HS256);
        header.kid = Some(cred.key_id.clone().unwrap_or_else(|| cred.issuer.clone()));

        let token = jsonwebtoken::encode(&header, &claims, &EncodingKey::from_secret(&cred.secret))
            .map_err(|err| Error::unexpected("failed to encode token").with_source(err))?;

        let mut value: HeaderValue = format!("Bearer {token}").parse()?;
        value.set_sensitive(true);
        req.headers.insert(AUTHORIZATION, value);

        Ok(())
    }
}

/// A fresh random token id.
///
/// `thread_rng` is safe to draw from concurrently, so parallel signing
/// calls never share an id.
fn random_token_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(22)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use authsign_core::hash::base64url_decode;
    use authsign_core::ErrorKind;
    use chrono::{TimeZone, Utc};
    use jsonwebtoken::{decode, decode_header, DecodingKey, Validation};

    fn parts(uri: &str) -> http::request::Parts {
        let mut req = http::Request::new(());
        *req.method_mut() = http::Method::POST;
        *req.uri_mut() = uri.parse().unwrap();
        req.into_parts().0
    }

    fn test_credential() -> Credential {
        Credential {
            issuer: "java-test-key".to_string(),
            secret: b"java-test-secret".to_vec(),
            key_id: None,
        }
    }

    fn bearer_token(req: &http::request::Parts) -> &str {
        let header = req.headers.get(AUTHORIZATION).unwrap();
        assert!(header.is_sensitive());
        header
            .to_str()
            .unwrap()
            .strip_prefix("Bearer ")
            .expect("authorization header must carry a bearer token")
    }

    /// Decode the payload segment without running verifier-side expiry
    /// checks, so tokens minted at a fixed past instant stay inspectable.
    fn decode_claims(token: &str) -> JwtClaims {
        let payload = token.split('.').nth(1).unwrap();
        serde_json::from_slice(&base64url_decode(payload).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_sign_post_with_fixed_time() -> anyhow::Result<()> {
        let signer = RequestSigner::new()
            .with_time(Utc.with_ymd_and_hms(2016, 3, 1, 0, 33, 20).unwrap())
            .with_token_id("0Zc6oLXhaPTqUNSuWSkUgQ");

        let mut req = parts("http://localhost:7070/job");
        signer
            .sign_request(&Context::default(), &mut req, Some(&test_credential()), None)
            .await?;

        let token = bearer_token(&req);
        let claims = decode_claims(token);

        assert_eq!(claims.iss, "java-test-key");
        assert_eq!(claims.jti, "0Zc6oLXhaPTqUNSuWSkUgQ");
        assert_eq!(claims.iat, 1456792400);
        assert_eq!(claims.nbf, 1456792400 - 60);
        assert_eq!(claims.exp, 1456792400 + 60);

        let header = decode_header(token)?;
        assert_eq!(header.alg, Algorithm::HS256);
        assert_eq!(header.kid.as_deref(), Some("java-test-key"));

        Ok(())
    }

    #[tokio::test]
    async fn test_claim_instants_are_ordered() -> anyhow::Result<()> {
        let signer = RequestSigner::new();

        let mut req = parts("http://localhost:7070/job");
        signer
            .sign_request(&Context::default(), &mut req, Some(&test_credential()), None)
            .await?;

        let claims = decode_claims(bearer_token(&req));
        assert!(claims.nbf < claims.iat);
        assert!(claims.iat < claims.exp);
        assert_eq!(claims.exp - claims.iat, DEFAULT_VALIDITY.as_secs());
        assert_eq!(claims.iat - claims.nbf, DEFAULT_LEEWAY.as_secs());

        Ok(())
    }

    #[tokio::test]
    async fn test_token_verifies_only_with_matching_secret() -> anyhow::Result<()> {
        let signer = RequestSigner::new();
        let cred = test_credential();

        let mut req = parts("http://localhost:7070/job");
        signer
            .sign_request(&Context::default(), &mut req, Some(&cred), None)
            .await?;
        let token = bearer_token(&req);

        let validation = Validation::new(Algorithm::HS256);
        decode::<JwtClaims>(token, &DecodingKey::from_secret(&cred.secret), &validation)?;

        let wrong = DecodingKey::from_secret(b"not-the-secret");
        assert!(decode::<JwtClaims>(token, &wrong, &validation).is_err());

        Ok(())
    }

    #[tokio::test]
    async fn test_expires_in_overrides_validity() -> anyhow::Result<()> {
        let signer = RequestSigner::new().with_validity(Duration::from_secs(30));

        let mut req = parts("http://localhost:7070/job");
        signer
            .sign_request(
                &Context::default(),
                &mut req,
                Some(&test_credential()),
                Some(Duration::from_secs(300)),
            )
            .await?;

        let claims = decode_claims(bearer_token(&req));
        assert_eq!(claims.exp - claims.iat, 300);

        Ok(())
    }

    #[tokio::test]
    async fn test_key_id_takes_precedence_over_issuer() -> anyhow::Result<()> {
        let signer = RequestSigner::new();
        let cred = Credential {
            key_id: Some("rotated-key-7".to_string()),
            ..test_credential()
        };

        let mut req = parts("http://localhost:7070/job");
        signer
            .sign_request(&Context::default(), &mut req, Some(&cred), None)
            .await?;

        let header = decode_header(bearer_token(&req))?;
        assert_eq!(header.kid.as_deref(), Some("rotated-key-7"));

        Ok(())
    }

    #[tokio::test]
    async fn test_sign_rejects_empty_secret() {
        let signer = RequestSigner::new();
        let cred = Credential {
            issuer: "java-test-key".to_string(),
            secret: Vec::new(),
            key_id: None,
        };

        let mut req = parts("http://localhost:7070/job");
        let err = signer
            .sign_request(&Context::default(), &mut req, Some(&cred), None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
    }

    #[tokio::test]
    async fn test_sign_rejects_zero_validity() {
        let signer = RequestSigner::new();

        let mut req = parts("http://localhost:7070/job");
        let err = signer
            .sign_request(
                &Context::default(),
                &mut req,
                Some(&test_credential()),
                Some(Duration::ZERO),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }

    #[tokio::test]
    async fn test_sign_rejects_overflowing_validity() {
        let signer = RequestSigner::new();

        let mut req = parts("http://localhost:7070/job");
        let err = signer
            .sign_request(
                &Context::default(),
                &mut req,
                Some(&test_credential()),
                Some(Duration::MAX),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }

    #[tokio::test]
    async fn test_sign_without_credential_is_noop() -> anyhow::Result<()> {
        let signer = RequestSigner::new();

        let mut req = parts("http://localhost:7070/job");
        signer
            .sign_request(&Context::default(), &mut req, None, None)
            .await?;
        assert!(req.headers.get(AUTHORIZATION).is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_token_ids_are_unique_per_call() -> anyhow::Result<()> {
        let signer = RequestSigner::new();
        let cred = test_credential();

        let mut first = parts("http://localhost:7070/job");
        let mut second = parts("http://localhost:7070/job");

        signer
            .sign_request(&Context::default(), &mut first, Some(&cred), None)
            .await?;
        signer
            .sign_request(&Context::default(), &mut second, Some(&cred), None)
            .await?;

        let first_claims = decode_claims(bearer_token(&first));
        let second_claims = decode_claims(bearer_token(&second));
        assert_ne!(first_claims.jti, second_claims.jti);

        Ok(())
    }
}
