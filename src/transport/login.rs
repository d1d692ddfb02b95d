use serde::Deserialize;

use crate::domain::{ContinuationClaims, VerificationMethod, WebSession};

use super::TransportError;

const AUTHENTICITY_TOKEN_FIELD: &str = "authenticity_token";
const COUNTRY_CODE_FIELD: &str = "x_auth_country_code";
const PHONE_NUMBER_FIELD: &str = "x_auth_phone_number";

#[derive(Debug, Clone, Deserialize)]
struct LoginJsonResponse {
    login_verification_request_id: StringOrNumber,
    login_verification_user_id: StringOrNumber,
    #[serde(default)]
    phone_number: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
/// The provider serializes user ids as JSON numbers and request ids as
/// strings; both are normalized to strings for the continuation claims.
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

impl StringOrNumber {
    fn into_string(self) -> String {
        match self {
            Self::String(value) => value,
            Self::Number(value) => value.to_string(),
        }
    }
}

/// Form body for the `/sdk/login` POST, in the order a browser submits it.
pub fn encode_login_form(
    session: &WebSession,
    method: VerificationMethod,
    country_code: &str,
    phone_number: &str,
) -> Vec<(String, String)> {
    vec![
        (
            AUTHENTICITY_TOKEN_FIELD.to_owned(),
            session.auth_token.clone(),
        ),
        (
            VerificationMethod::FIELD.to_owned(),
            method.as_str().to_owned(),
        ),
        (COUNTRY_CODE_FIELD.to_owned(), country_code.to_owned()),
        (PHONE_NUMBER_FIELD.to_owned(), phone_number.to_owned()),
    ]
}

/// Decode the `/sdk/login` JSON response into continuation claims.
///
/// `fallback_phone` (the caller's input number) is used when the provider
/// omits `phone_number`. Both verification ids are required.
pub fn decode_login_json_response(
    json: &str,
    fallback_phone: &str,
) -> Result<ContinuationClaims, TransportError> {
    let parsed: LoginJsonResponse = serde_json::from_str(json)?;
    Ok(ContinuationClaims {
        login_verification_request_id: parsed.login_verification_request_id.into_string(),
        login_verification_user_id: parsed.login_verification_user_id.into_string(),
        phone_number: parsed
            .phone_number
            .unwrap_or_else(|| fallback_phone.to_owned()),
    })
}
