//! Two-legged OAuth 1.0a signing implementation for authsign.
//!
//! This crate attaches an `Authorization: OAuth ...` header to outbound
//! requests, signed with HMAC-SHA1 over the canonical base string of
//! RFC 5849 section 3.4.1.
//!
//! ## Quick Start
//!
//! ```no_run
//! use authsign_core::{Context, Result, Signer};
//! use authsign_oauth1::{RequestSigner, StaticCredentialProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let ctx = Context::default();
//!
//!     let loader = StaticCredentialProvider::new("my-consumer-key", "my-consumer-secret");
//!     let builder = RequestSigner::new();
//!     let signer = Signer::new(ctx, loader, builder);
//!
//!     let mut req = http::Request::get("http://localhost:8000/job")
//!         .body(())
//!         .unwrap()
//!         .into_parts()
//!         .0;
//!
//!     signer.sign(&mut req, None).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Credential Sources
//!
//! Credentials load from explicit values, environment variables
//! (`AUTHSIGN_OAUTH1_CONSUMER_KEY`, `AUTHSIGN_OAUTH1_CONSUMER_SECRET`), or a
//! key directory holding one secret file per consumer key
//! (`AUTHSIGN_OAUTH1_KEY_PATH`).
//!
//! ## Form bodies
//!
//! The signature must cover the exact parameter set that is transmitted.
//! When a request carries an `application/x-www-form-urlencoded` body, the
//! body pairs have to be declared to the signer so they enter the base
//! string:
//!
//! ```no_run
//! use authsign_oauth1::RequestSigner;
//!
//! let builder = RequestSigner::new()
//!     .with_form_params(vec![("post".to_string(), "happy".to_string())]);
//! ```

mod constants;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod sign_request;
pub use sign_request::RequestSigner;

mod provide_credential;
pub use provide_credential::*;
