use serde::Deserialize;

use crate::domain::{ChallengeError, ContinuationClaims, WebSession};

use super::TransportError;

const AUTHENTICITY_TOKEN_FIELD: &str = "authenticity_token";
const REMEMBER_ME_FIELD: &str = "remember_me";
const PHONE_NUMBER_FIELD: &str = "phone_number";
const USER_ID_FIELD: &str = "login_verification_user_id";
const CHALLENGE_RESPONSE_FIELD: &str = "login_verification_challenge_response";
const REQUEST_ID_FIELD: &str = "login_verification_request_id";

#[derive(Debug, Clone, Deserialize)]
struct ChallengeJsonResponse {
    /// Authorization header name the provider echoes in the body when the
    /// code is accepted.
    #[serde(rename = "X-Verify-Credentials-Authorization", default)]
    credentials_authorization: Option<serde_json::Value>,
    #[serde(default)]
    errors: Option<Vec<ChallengeJsonError>>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChallengeJsonError {
    code: i64,
    message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Decoded `/sdk/challenge` JSON body, parsed regardless of HTTP status.
pub struct ChallengeResponse {
    /// Whether a truthy credentials authorization was present.
    pub authorized: bool,
    /// Provider-reported errors, present on rejection responses.
    pub errors: Option<Vec<ChallengeError>>,
}

/// Form body for the `/sdk/challenge` POST, in the order a browser submits it.
pub fn encode_challenge_form(
    session: &WebSession,
    claims: &ContinuationClaims,
    code: &str,
) -> Vec<(String, String)> {
    vec![
        (
            AUTHENTICITY_TOKEN_FIELD.to_owned(),
            session.auth_token.clone(),
        ),
        (REMEMBER_ME_FIELD.to_owned(), "off".to_owned()),
        (PHONE_NUMBER_FIELD.to_owned(), claims.phone_number.clone()),
        (
            USER_ID_FIELD.to_owned(),
            claims.login_verification_user_id.clone(),
        ),
        (CHALLENGE_RESPONSE_FIELD.to_owned(), code.to_owned()),
        (
            REQUEST_ID_FIELD.to_owned(),
            claims.login_verification_request_id.clone(),
        ),
    ]
}

pub fn decode_challenge_json_response(json: &str) -> Result<ChallengeResponse, TransportError> {
    let parsed: ChallengeJsonResponse = serde_json::from_str(json)?;
    Ok(ChallengeResponse {
        authorized: parsed
            .credentials_authorization
            .as_ref()
            .is_some_and(is_truthy),
        errors: parsed.errors.map(|errors| {
            errors
                .into_iter()
                .map(|error| ChallengeError {
                    code: error.code,
                    message: error.message,
                })
                .collect()
        }),
    })
}

/// JavaScript-style truthiness for the authorization field: `null`, `false`,
/// `0`, and `""` are falsy, everything else is truthy.
fn is_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().is_none_or(|f| f != 0.0),
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> WebSession {
        WebSession {
            cookie: "_provider_sess=abc".to_owned(),
            auth_token: "tok-123".to_owned(),
        }
    }

    fn claims() -> ContinuationClaims {
        ContinuationClaims {
            login_verification_request_id: "req-1".to_owned(),
            login_verification_user_id: "user-1".to_owned(),
            phone_number: "+33648446907".to_owned(),
        }
    }

    #[test]
    fn form_fields_follow_browser_order() {
        let params = encode_challenge_form(&session(), &claims(), "196099");
        assert_eq!(
            params,
            vec![
                ("authenticity_token".to_owned(), "tok-123".to_owned()),
                ("remember_me".to_owned(), "off".to_owned()),
                ("phone_number".to_owned(), "+33648446907".to_owned()),
                ("login_verification_user_id".to_owned(), "user-1".to_owned()),
                (
                    "login_verification_challenge_response".to_owned(),
                    "196099".to_owned()
                ),
                (
                    "login_verification_request_id".to_owned(),
                    "req-1".to_owned()
                ),
            ]
        );
    }

    #[test]
    fn authorization_field_makes_the_response_authorized() {
        let json = r#"{ "X-Verify-Credentials-Authorization": "OAuth oauth_consumer_key=..." }"#;
        let response = decode_challenge_json_response(json).unwrap();
        assert!(response.authorized);
        assert!(response.errors.is_none());
    }

    #[test]
    fn falsy_authorization_values_are_not_authorized() {
        for body in [
            "{}",
            r#"{ "X-Verify-Credentials-Authorization": null }"#,
            r#"{ "X-Verify-Credentials-Authorization": "" }"#,
            r#"{ "X-Verify-Credentials-Authorization": false }"#,
            r#"{ "X-Verify-Credentials-Authorization": 0 }"#,
        ] {
            let response = decode_challenge_json_response(body).unwrap();
            assert!(!response.authorized, "expected falsy for body: {body}");
        }
    }

    #[test]
    fn errors_are_decoded_in_order() {
        let json = r#"
        {
          "errors": [
            { "code": 235, "message": "The login verification request has expired" },
            { "code": 236, "message": "Wrong code" }
          ]
        }
        "#;
        let response = decode_challenge_json_response(json).unwrap();
        let errors = response.errors.unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].code, 235);
        assert_eq!(errors[1].message, "Wrong code");
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        assert!(matches!(
            decode_challenge_json_response("{ not json }"),
            Err(TransportError::Json(_))
        ));
    }
}
