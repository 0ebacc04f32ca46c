use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

// Protocol parameter names, per RFC 5849.
pub const OAUTH_CONSUMER_KEY: &str = "oauth_consumer_key";
pub const OAUTH_NONCE: &str = "oauth_nonce";
pub const OAUTH_SIGNATURE: &str = "oauth_signature";
pub const OAUTH_SIGNATURE_METHOD: &str = "oauth_signature_method";
pub const OAUTH_TIMESTAMP: &str = "oauth_timestamp";
pub const OAUTH_VERSION: &str = "oauth_version";

pub const HMAC_SHA1: &str = "HMAC-SHA1";
pub const OAUTH_VERSION_VALUE: &str = "1.0";

// Env values used in oauth1 credential loading.
pub const AUTHSIGN_OAUTH1_CONSUMER_KEY: &str = "AUTHSIGN_OAUTH1_CONSUMER_KEY";
pub const AUTHSIGN_OAUTH1_CONSUMER_SECRET: &str = "AUTHSIGN_OAUTH1_CONSUMER_SECRET";
pub const AUTHSIGN_OAUTH1_TOKEN_SECRET: &str = "AUTHSIGN_OAUTH1_TOKEN_SECRET";
pub const AUTHSIGN_OAUTH1_KEY_PATH: &str = "AUTHSIGN_OAUTH1_KEY_PATH";

/// AsciiSet for [RFC 3986 percent-encoding](https://www.rfc-editor.org/rfc/rfc3986#section-2.3)
///
/// - Encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
pub static RFC3986_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
