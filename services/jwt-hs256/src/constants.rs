use std::time::Duration;

// Env values used in jwt credential loading.
pub const AUTHSIGN_JWT_ISSUER: &str = "AUTHSIGN_JWT_ISSUER";
pub const AUTHSIGN_JWT_SECRET: &str = "AUTHSIGN_JWT_SECRET";
pub const AUTHSIGN_JWT_KEY_ID: &str = "AUTHSIGN_JWT_KEY_ID";
pub const AUTHSIGN_JWT_JWK_PATH: &str = "AUTHSIGN_JWT_JWK_PATH";

/// Tokens expire this long after issuance unless overridden, keeping the
/// replay window small.
pub const DEFAULT_VALIDITY: Duration = Duration::from_secs(60);

/// Not-before is back-dated by this much to absorb clock skew between
/// client and verifier.
pub const DEFAULT_LEEWAY: Duration = Duration::from_secs(60);
