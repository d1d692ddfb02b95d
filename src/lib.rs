//! Typed Rust client for the Digits phone-number verification web flow.
//!
//! The crate automates the two-step verification protocol: request a code
//! via SMS or voice call (returning an opaque registration token), then
//! submit the user-entered code together with that token. Each step scrapes
//! a fresh ephemeral web session (cookie + anti-forgery token) from the
//! provider's embed page, so the client holds no session state between the
//! two calls; the caller-held token is the only continuation.
//!
//! The design follows three layers: a domain layer of strong types, a
//! transport layer for wire-format quirks (form encoding, HTML scraping,
//! token codec), and a small client layer orchestrating requests.
//!
//! ```rust,no_run
//! use digits_client::{BrowserIdentity, Credentials, DigitsClient, SendVerificationCode, VerifyCode};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), digits_client::DigitsError> {
//!     let client = DigitsClient::new(Credentials::new("myConsumerKey", "https://example.com"));
//!     let identity = BrowserIdentity::new("Mozilla/5.0 ...", "en-US");
//!
//!     let token = client
//!         .send_verification_code(SendVerificationCode::new("0648446907", "FR", identity.clone()))
//!         .await?;
//!
//!     // Later, once the user has entered the code they received:
//!     let outcome = client
//!         .verify_code(VerifyCode::new(token, "196099", identity))
//!         .await?;
//!     println!("verified: {}", outcome.success());
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{DigitsClient, DigitsClientBuilder, DigitsError};
pub use domain::{
    BrowserIdentity, ChallengeError, ContinuationClaims, Credentials, SendVerificationCode,
    ValidationError, VerificationMethod, VerificationOutcome, VerifyCode, WebSession,
};
