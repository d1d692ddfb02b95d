use crate::domain::value::{BrowserIdentity, VerificationMethod};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to send a verification code to a phone.
///
/// Fields are carried as raw strings; the client validates them in a fixed
/// order (identity headers, then presence of both phone fields, then
/// structural phone validity) so that the first failure wins.
pub struct SendVerificationCode {
    pub phone_number: String,
    pub country_code: String,
    pub method: VerificationMethod,
    pub identity: BrowserIdentity,
}

impl SendVerificationCode {
    /// Create a request delivered via SMS (the default method).
    pub fn new(
        phone_number: impl Into<String>,
        country_code: impl Into<String>,
        identity: BrowserIdentity,
    ) -> Self {
        Self {
            phone_number: phone_number.into(),
            country_code: country_code.into(),
            method: VerificationMethod::default(),
            identity,
        }
    }

    /// Override the delivery method (SMS or voice call).
    pub fn with_method(mut self, method: VerificationMethod) -> Self {
        self.method = method;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to verify a user-entered code against a previously issued
/// registration token.
pub struct VerifyCode {
    /// Opaque token returned by `send_verification_code`.
    pub registration_token: String,
    /// Code the user received via SMS or voice call.
    pub code: String,
    pub identity: BrowserIdentity,
}

impl VerifyCode {
    pub fn new(
        registration_token: impl Into<String>,
        code: impl Into<String>,
        identity: BrowserIdentity,
    ) -> Self {
        Self {
            registration_token: registration_token.into(),
            code: code.into(),
            identity,
        }
    }
}
