use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// One provider-reported error from a failed challenge, in the order the
/// provider returned them.
pub struct ChallengeError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Outcome of a `verify_code` call that reached the provider.
///
/// The two variants carry the phone number under different names. This
/// mirrors the provider-facing API, which uses `phoneNumber` on the success
/// path and `phone` on the rejection path; the asymmetry is a fixed quirk of
/// the observed behavior and is preserved rather than unified.
pub enum VerificationOutcome {
    /// The provider answered the challenge with HTTP 200. `success` reflects
    /// whether a credentials authorization was present in the body.
    Verified { success: bool, phone_number: String },
    /// The provider rejected the challenge and reported structured errors
    /// (wrong code, expired request, and so on).
    Rejected {
        phone: String,
        errors: Vec<ChallengeError>,
    },
}

impl VerificationOutcome {
    /// Whether the code was accepted.
    pub fn success(&self) -> bool {
        matches!(self, Self::Verified { success: true, .. })
    }

    /// The phone number the outcome refers to, regardless of variant.
    pub fn phone(&self) -> &str {
        match self {
            Self::Verified { phone_number, .. } => phone_number,
            Self::Rejected { phone, .. } => phone,
        }
    }
}

impl Serialize for VerificationOutcome {
    /// Serializes to the asymmetric wire shapes:
    /// `{"success": bool, "phoneNumber": "..."}` on the success path and
    /// `{"success": false, "phone": "...", "errors": [...]}` on rejection.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Verified {
                success,
                phone_number,
            } => {
                let mut state = serializer.serialize_struct("VerificationOutcome", 2)?;
                state.serialize_field("success", success)?;
                state.serialize_field("phoneNumber", phone_number)?;
                state.end()
            }
            Self::Rejected { phone, errors } => {
                let mut state = serializer.serialize_struct("VerificationOutcome", 3)?;
                state.serialize_field("success", &false)?;
                state.serialize_field("phone", phone)?;
                state.serialize_field("errors", errors)?;
                state.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_cover_both_variants() {
        let verified = VerificationOutcome::Verified {
            success: true,
            phone_number: "+33648446907".to_owned(),
        };
        assert!(verified.success());
        assert_eq!(verified.phone(), "+33648446907");

        let rejected = VerificationOutcome::Rejected {
            phone: "+33648446907".to_owned(),
            errors: vec![ChallengeError {
                code: 235,
                message: "The login verification request has expired".to_owned(),
            }],
        };
        assert!(!rejected.success());
        assert_eq!(rejected.phone(), "+33648446907");
    }

    #[test]
    fn verified_serializes_with_phone_number_field() {
        let outcome = VerificationOutcome::Verified {
            success: true,
            phone_number: "+33648446907".to_owned(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "success": true, "phoneNumber": "+33648446907" })
        );
    }

    #[test]
    fn rejected_serializes_with_phone_field_and_errors() {
        let outcome = VerificationOutcome::Rejected {
            phone: "+33648446907".to_owned(),
            errors: vec![ChallengeError {
                code: 235,
                message: "The login verification request has expired".to_owned(),
            }],
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "success": false,
                "phone": "+33648446907",
                "errors": [
                    { "code": 235, "message": "The login verification request has expired" }
                ]
            })
        );
    }
}
