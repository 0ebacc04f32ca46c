//! Core components for signing outbound HTTP requests.
//!
//! This crate provides the foundational types and traits for the authsign
//! ecosystem. Scheme crates (OAuth 1.0a, JWT bearer) build on these
//! abstractions to attach an `Authorization` credential to a pending request.
//!
//! ## Overview
//!
//! The crate is built around a few key concepts:
//!
//! - **Context**: a container that holds implementations for file reading,
//!   HTTP sending, and environment access
//! - **Traits**: abstract interfaces for credential loading
//!   ([`ProvideCredential`]) and request signing ([`SignRequest`])
//! - **Signer**: the orchestrator that coordinates credential loading and
//!   request signing
//!
//! ## Example
//!
//! ```no_run
//! use authsign_core::{Context, Signer, ProvideCredential, SignRequest, SigningCredential, Result};
//! use async_trait::async_trait;
//! use std::time::Duration;
//!
//! #[derive(Clone, Debug)]
//! struct MyCredential {
//!     key: String,
//!     secret: String,
//! }
//!
//! impl SigningCredential for MyCredential {
//!     fn is_valid(&self) -> bool {
//!         !self.key.is_empty() && !self.secret.is_empty()
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct MyLoader;
//!
//! #[async_trait]
//! impl ProvideCredential for MyLoader {
//!     type Credential = MyCredential;
//!
//!     async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
//!         Ok(Some(MyCredential {
//!             key: "my-key".to_string(),
//!             secret: "my-secret".to_string(),
//!         }))
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct MyBuilder;
//!
//! #[async_trait]
//! impl SignRequest for MyBuilder {
//!     type Credential = MyCredential;
//!
//!     async fn sign_request(
//!         &self,
//!         _ctx: &Context,
//!         _req: &mut http::request::Parts,
//!         _cred: Option<&Self::Credential>,
//!         _expires_in: Option<Duration>,
//!     ) -> Result<()> {
//!         // Attach the Authorization header here.
//!         todo!()
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let ctx = Context::default();
//! let signer = Signer::new(ctx, MyLoader, MyBuilder);
//!
//! let mut parts = http::Request::builder()
//!     .method("GET")
//!     .uri("https://example.com")
//!     .body(())
//!     .unwrap()
//!     .into_parts()
//!     .0;
//!
//! signer.sign(&mut parts, None).await?;
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::Context;
mod fs;
pub use fs::FileRead;
mod http_send;
pub use http_send::HttpSend;
mod env;
pub use env::Env;
pub use env::OsEnv;
pub use env::StaticEnv;

mod api;
pub use api::{ProvideCredential, SignRequest, SigningCredential};
mod chain;
pub use chain::ProvideCredentialChain;
mod signer;
pub use signer::Signer;

mod error;
pub use error::{Error, ErrorKind, Result};
