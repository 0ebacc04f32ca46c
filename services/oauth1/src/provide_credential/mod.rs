mod config;
pub use config::ConfigCredentialProvider;

mod default;
pub use default::DefaultCredentialProvider;

mod env;
pub use env::EnvCredentialProvider;

mod key_file;
pub use key_file::KeyFileCredentialProvider;

mod r#static;
pub use r#static::StaticCredentialProvider;
