//! JWT HS256 bearer-token issuance for authsign.
//!
//! This crate attaches an `Authorization: Bearer <jwt>` header to outbound
//! requests. The token is a compact HS256 JWS whose claims carry the
//! issuer, a fresh token id, and a short validity window bounding replay
//! risk.
//!
//! ## Quick Start
//!
//! ```no_run
//! use authsign_core::{Context, Result, Signer};
//! use authsign_jwt_hs256::{RequestSigner, StaticCredentialProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let ctx = Context::default();
//!
//!     let loader = StaticCredentialProvider::new("my-issuer", b"my-shared-secret");
//!     let builder = RequestSigner::new();
//!     let signer = Signer::new(ctx, loader, builder);
//!
//!     let mut req = http::Request::post("http://localhost:7070/job")
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
//! (`AUTHSIGN_JWT_ISSUER`, `AUTHSIGN_JWT_SECRET` with a base64 secret), or
//! a symmetric JSON Web Key file (`AUTHSIGN_JWT_JWK_PATH`).

mod constants;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod sign_request;
pub use sign_request::{JwtClaims, RequestSigner};

mod provide_credential;
pub use provide_credential::*;
