mod config;
pub use config::ConfigCredentialProvider;

mod default;
pub use default::DefaultCredentialProvider;

mod env;
pub use env::EnvCredentialProvider;

mod jwk_file;
pub use jwk_file::JwkFileCredentialProvider;

mod r#static;
pub use r#static::StaticCredentialProvider;
