use super::constants::*;
use authsign_core::Context;

/// Config carries all the configuration for OAuth 1.0a credential loading.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// `consumer_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AUTHSIGN_OAUTH1_CONSUMER_KEY`]
    pub consumer_key: Option<String>,
    /// `consumer_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AUTHSIGN_OAUTH1_CONSUMER_SECRET`]
    pub consumer_secret: Option<String>,
    /// `token_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AUTHSIGN_OAUTH1_TOKEN_SECRET`]
    pub token_secret: Option<String>,
    /// `key_path` names a directory holding one secret file per consumer
    /// key. It will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AUTHSIGN_OAUTH1_KEY_PATH`]
    pub key_path: Option<String>,
}

impl Config {
    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(AUTHSIGN_OAUTH1_CONSUMER_KEY) {
            self.consumer_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(AUTHSIGN_OAUTH1_CONSUMER_SECRET) {
            self.consumer_secret.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(AUTHSIGN_OAUTH1_TOKEN_SECRET) {
            self.token_secret.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(AUTHSIGN_OAUTH1_KEY_PATH) {
            self.key_path.get_or_insert(v);
        }

        self
    }
}
