#[derive(Debug, Clone, PartialEq, Eq)]
/// Immutable credentials supplied at client construction.
///
/// Construction never fails: per-operation checks reject unconfigured
/// credentials with a configuration error instead, so a half-configured
/// client can still be built and wired up before the keys are known.
pub struct Credentials {
    pub consumer_key: String,
    pub host: String,
}

impl Credentials {
    /// Create credentials from a consumer key and the host origin URL
    /// registered with the provider.
    pub fn new(consumer_key: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            host: host.into(),
        }
    }

    /// Both fields must be non-empty for any operation to proceed.
    pub fn is_configured(&self) -> bool {
        !self.consumer_key.is_empty() && !self.host.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Caller-supplied browser fingerprint passed through to the provider on
/// every request.
///
/// Both fields are required non-empty on every operation.
pub struct BrowserIdentity {
    pub user_agent: String,
    pub accept_language: String,
}

impl BrowserIdentity {
    pub fn new(user_agent: impl Into<String>, accept_language: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            accept_language: accept_language.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.user_agent.is_empty() && !self.accept_language.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// How the provider delivers the verification code.
pub enum VerificationMethod {
    #[default]
    Sms,
    VoiceCall,
}

impl VerificationMethod {
    /// Form field name used by the provider (`verification_type`).
    pub const FIELD: &'static str = "verification_type";

    /// Wire value sent in the login form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sms => "sms",
            Self::VoiceCall => "voicecall",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Ephemeral authenticated web session scraped from the embed page.
///
/// Acquired fresh for each operation and discarded after use; never cached
/// across calls.
pub struct WebSession {
    /// Session cookie as a single `name=value` pair.
    pub cookie: String,
    /// Anti-forgery token (`authenticity_token`) embedded in the page.
    pub auth_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Server-issued identifiers carried between the send and verify steps.
///
/// These are the logical contents of the opaque registration token. The
/// token is produced only by `send_verification_code` and consumed only by
/// `verify_code`; decoding is pure and never mutates the token.
pub struct ContinuationClaims {
    pub login_verification_request_id: String,
    pub login_verification_user_id: String,
    pub phone_number: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_require_both_fields() {
        assert!(Credentials::new("key", "https://example.com").is_configured());
        assert!(!Credentials::new("", "https://example.com").is_configured());
        assert!(!Credentials::new("key", "").is_configured());
        assert!(!Credentials::new("", "").is_configured());
    }

    #[test]
    fn browser_identity_requires_both_fields() {
        assert!(BrowserIdentity::new("Mozilla/5.0", "en-US").is_complete());
        assert!(!BrowserIdentity::new("", "en-US").is_complete());
        assert!(!BrowserIdentity::new("Mozilla/5.0", "").is_complete());
    }

    #[test]
    fn verification_method_wire_values() {
        assert_eq!(VerificationMethod::Sms.as_str(), "sms");
        assert_eq!(VerificationMethod::VoiceCall.as_str(), "voicecall");
        assert_eq!(VerificationMethod::default(), VerificationMethod::Sms);
    }
}
