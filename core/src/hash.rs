//! Hash related utils.

use crate::Error;
use base64::prelude::BASE64_STANDARD;
use base64::prelude::BASE64_URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::Hmac;
use hmac::Mac;
use sha1::Sha1;
use sha2::Sha256;

/// Base64 encode
pub fn base64_encode(content: &[u8]) -> String {
    BASE64_STANDARD.encode(content)
}

/// Base64 decode
pub fn base64_decode(content: &str) -> crate::Result<Vec<u8>> {
    BASE64_STANDARD
        .decode(content)
        .map_err(|e| Error::encoding_invalid("base64 decode failed").with_source(e))
}

/// Base64url decode without padding, as used by JSON Web Keys and compact
/// JWS segments.
pub fn base64url_decode(content: &str) -> crate::Result<Vec<u8>> {
    BASE64_URL_SAFE_NO_PAD
        .decode(content)
        .map_err(|e| Error::encoding_invalid("base64url decode failed").with_source(e))
}

/// Base64 encoded HMAC with SHA1 hash.
pub fn base64_hmac_sha1(key: &[u8], content: &[u8]) -> String {
    // SAFETY: HMAC's new_from_slice always returns Ok - it handles any key length
    let mut h = Hmac::<Sha1>::new_from_slice(key).unwrap();
    h.update(content);

    base64_encode(&h.finalize().into_bytes())
}

/// Base64 encoded HMAC with SHA256 hash.
pub fn base64_hmac_sha256(key: &[u8], content: &[u8]) -> String {
    // SAFETY: HMAC's new_from_slice always returns Ok - it handles any key length
    let mut h = Hmac::<Sha256>::new_from_slice(key).unwrap();
    h.update(content);

    base64_encode(&h.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base64_round_trip() {
        let decoded = base64_decode(&base64_encode(b"super-insecure-secret")).unwrap();
        assert_eq!(decoded, b"super-insecure-secret");
    }

    #[test]
    fn test_base64url_decode_rejects_standard_padding() {
        assert!(base64url_decode("c3VyZQ==").is_err());
        assert_eq!(base64url_decode("c3VyZQ").unwrap(), b"sure");
    }

    #[test]
    fn test_base64_hmac_sha1() {
        // RFC 2202 test case 2.
        assert_eq!(
            base64_hmac_sha1(b"Jefe", b"what do ya want for nothing?"),
            "7/zfauXrL6LSdBbV8YTfnCWafHk="
        );
    }
}
