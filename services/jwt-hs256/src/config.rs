use super::constants::*;
use authsign_core::Context;

/// Config carries all the configuration for JWT credential loading.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// `issuer` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AUTHSIGN_JWT_ISSUER`]
    pub issuer: Option<String>,
    /// `secret` is the base64-encoded shared secret. It will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AUTHSIGN_JWT_SECRET`]
    pub secret: Option<String>,
    /// `key_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AUTHSIGN_JWT_KEY_ID`]
    pub key_id: Option<String>,
    /// `key_path` names a symmetric JSON Web Key file. It will be loaded
    /// from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AUTHSIGN_JWT_JWK_PATH`]
    pub key_path: Option<String>,
}

impl Config {
    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(AUTHSIGN_JWT_ISSUER) {
            self.issuer.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(AUTHSIGN_JWT_SECRET) {
            self.secret.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(AUTHSIGN_JWT_KEY_ID) {
            self.key_id.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(AUTHSIGN_JWT_JWK_PATH) {
            self.key_path.get_or_insert(v);
        }

        self
    }
}
