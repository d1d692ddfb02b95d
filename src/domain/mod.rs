//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{SendVerificationCode, VerifyCode};
pub use response::{ChallengeError, VerificationOutcome};
pub use validation::{ValidationError, validate_phone_number};
pub use value::{
    BrowserIdentity, ContinuationClaims, Credentials, VerificationMethod, WebSession,
};
