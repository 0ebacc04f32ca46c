use crate::constants::*;
use crate::credential::Credential;
use async_trait::async_trait;
use authsign_core::hash::base64_hmac_sha1;
use authsign_core::time::{now, unix_timestamp, DateTime};
use authsign_core::{Context, Error, Result, SignRequest};
use http::header::AUTHORIZATION;
use http::HeaderValue;
use log::debug;
use percent_encoding::utf8_percent_encode;
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::fmt::Write;
use std::time::Duration;

/// RequestSigner for two-legged OAuth 1.0a with HMAC-SHA1.
///
/// The signature base string is derived from the exact parameter set that
/// will be transmitted: the query string, the declared form-encoded body
/// pairs, and the OAuth protocol parameters. Altering any of them after
/// signing invalidates the signature server-side.
#[derive(Debug, Default)]
pub struct RequestSigner {
    form_params: Vec<(String, String)>,
    time: Option<DateTime>,
    nonce: Option<String>,
}

impl RequestSigner {
    /// Create a new OAuth 1.0a signer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the form-encoded body pairs of the pending request.
    ///
    /// Duplicate names are legal and kept as separate entries. The declared
    /// pairs must match the transmitted body byte-for-byte.
    pub fn with_form_params(mut self, params: Vec<(String, String)>) -> Self {
        self.form_params = params;
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

    /// Specify the nonce.
    ///
    /// # Note
    ///
    /// Nonces must be drawn fresh per request to prevent replay.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_nonce(mut self, nonce: &str) -> Self {
        self.nonce = Some(nonce.to_string());
        self
    }

    fn get_time(&self) -> DateTime {
        self.time.unwrap_or_else(now)
    }

    fn get_nonce(&self) -> String {
        self.nonce.clone().unwrap_or_else(random_nonce)
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

        if cred.consumer_secret.is_empty() {
            return Err(Error::credential_invalid(
                "consumer secret is empty, cannot sign",
            ));
        }
        if expires_in.is_some() {
            return Err(Error::request_invalid(
                "OAuth 1.0a has no expiring signature form",
            ));
        }

        let timestamp = unix_timestamp(self.get_time())?;
        let nonce = self.get_nonce();

        let signature = self.calculate(req, cred, &nonce, timestamp)?;
        let header = build_header(cred, &nonce, &signature, timestamp)?;
        req.headers.insert(AUTHORIZATION, header);

        Ok(())
    }
}

impl RequestSigner {
    fn calculate(
        &self,
        req: &http::request::Parts,
        cred: &Credential,
        nonce: &str,
        timestamp: u64,
    ) -> Result<String> {
        let base = self.build_base_string(req, cred, nonce, timestamp)?;
        debug!("signature base string: {base}");

        let mut key = percent_encode(&cred.consumer_secret);
        key.push('&');
        key.push_str(&percent_encode(cred.token_secret.as_deref().unwrap_or("")));

        Ok(base64_hmac_sha1(key.as_bytes(), base.as_bytes()))
    }

    /// Build the canonical base string of RFC 5849 section 3.4.1:
    /// `METHOD&enc(base-url)&enc(sorted-parameter-string)`.
    fn build_base_string(
        &self,
        req: &http::request::Parts,
        cred: &Credential,
        nonce: &str,
        timestamp: u64,
    ) -> Result<String> {
        let mut pairs: Vec<(String, String)> = Vec::new();

        // Query parameters, duplicate names preserved.
        if let Some(query) = req.uri.query() {
            for (k, v) in form_urlencoded::parse(query.as_bytes()) {
                pairs.push((k.into_owned(), v.into_owned()));
            }
        }

        // Declared form-encoded body parameters.
        pairs.extend(self.form_params.iter().cloned());

        // Protocol parameters. oauth_signature is never an input to itself.
        pairs.push((OAUTH_CONSUMER_KEY.to_string(), cred.consumer_key.clone()));
        pairs.push((OAUTH_NONCE.to_string(), nonce.to_string()));
        pairs.push((OAUTH_SIGNATURE_METHOD.to_string(), HMAC_SHA1.to_string()));
        pairs.push((OAUTH_TIMESTAMP.to_string(), timestamp.to_string()));
        pairs.push((OAUTH_VERSION.to_string(), OAUTH_VERSION_VALUE.to_string()));

        // Encode first, then sort the encoded pairs by name and value so
        // repeated names order deterministically.
        let mut encoded: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (percent_encode(k), percent_encode(v)))
            .collect();
        encoded.sort();

        let mut params = String::with_capacity(128);
        for (idx, (k, v)) in encoded.iter().enumerate() {
            if idx != 0 {
                params.push('&');
            }
            params.push_str(k);
            params.push('=');
            params.push_str(v);
        }

        let mut base = String::with_capacity(params.len() + 64);
        base.push_str(req.method.as_str());
        base.push('&');
        base.push_str(&percent_encode(&base_url(&req.uri)?));
        base.push('&');
        base.push_str(&percent_encode(&params));

        Ok(base)
    }
}

/// The base URL of the request: scheme, host, and path with the query
/// stripped. Scheme and host are lowercased and default ports elided.
fn base_url(uri: &http::Uri) -> Result<String> {
    let authority = uri
        .authority()
        .ok_or_else(|| Error::request_invalid("request without authority is invalid for signing"))?;

    let scheme = uri.scheme_str().unwrap_or("http").to_ascii_lowercase();
    let host = authority.host().to_ascii_lowercase();
    let port = match (authority.port_u16(), scheme.as_str()) {
        (Some(80), "http") | (Some(443), "https") | (None, _) => None,
        (Some(p), _) => Some(p),
    };

    let mut url = String::with_capacity(32);
    write!(url, "{scheme}://{host}")?;
    if let Some(p) = port {
        write!(url, ":{p}")?;
    }
    url.push_str(uri.path());

    Ok(url)
}

fn build_header(
    cred: &Credential,
    nonce: &str,
    signature: &str,
    timestamp: u64,
) -> Result<HeaderValue> {
    let mut s = String::with_capacity(256);
    write!(
        s,
        "OAuth {OAUTH_CONSUMER_KEY}=\"{}\"",
        percent_encode(&cred.consumer_key)
    )?;
    write!(s, ", {OAUTH_NONCE}=\"{}\"", percent_encode(nonce))?;
    write!(s, ", {OAUTH_SIGNATURE}=\"{}\"", percent_encode(signature))?;
    write!(s, ", {OAUTH_SIGNATURE_METHOD}=\"{HMAC_SHA1}\"")?;
    write!(s, ", {OAUTH_TIMESTAMP}=\"{timestamp}\"")?;
    write!(s, ", {OAUTH_VERSION}=\"{OAUTH_VERSION_VALUE}\"")?;

    let mut header: HeaderValue = s.parse()?;
    header.set_sensitive(true);
    Ok(header)
}

fn percent_encode(s: &str) -> String {
    utf8_percent_encode(s, &RFC3986_ENCODE_SET).to_string()
}

/// A fresh random alphanumeric token, single-use per request.
///
/// `thread_rng` is safe to draw from concurrently, so parallel signing
/// calls never share a nonce.
fn random_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}
