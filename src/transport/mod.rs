//! Transport layer: wire-format details (form encoding, HTML scraping,
//! JSON/token decoding). Pure functions, no I/O.

mod challenge;
mod login;
mod session;
mod token;

pub use challenge::{ChallengeResponse, decode_challenge_json_response, encode_challenge_form};
pub use login::{decode_login_json_response, encode_login_form};
pub use session::{extract_auth_token, extract_failure_message, extract_session_cookie};
pub use token::{decode_continuation_claims, decode_token_bytes, encode_continuation_token};

use crate::domain::{BrowserIdentity, WebSession};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Headers sent with both provider POSTs, assembled as if from a browser:
/// the scraped session cookie, the embed URL as referer, and the caller's
/// pass-through fingerprint.
pub fn browser_headers(
    session: &WebSession,
    referer: &str,
    identity: &BrowserIdentity,
) -> Vec<(String, String)> {
    vec![
        ("cookie".to_owned(), session.cookie.clone()),
        ("referer".to_owned(), referer.to_owned()),
        (
            "accept-language".to_owned(),
            identity.accept_language.clone(),
        ),
        ("user-agent".to_owned(), identity.user_agent.clone()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browser_headers_are_ordered_and_complete() {
        let session = WebSession {
            cookie: "_session=abc".to_owned(),
            auth_token: "tok".to_owned(),
        };
        let identity = BrowserIdentity::new("Mozilla/5.0", "en-US");
        let headers = browser_headers(&session, "https://example.invalid/embed", &identity);

        assert_eq!(
            headers,
            vec![
                ("cookie".to_owned(), "_session=abc".to_owned()),
                (
                    "referer".to_owned(),
                    "https://example.invalid/embed".to_owned()
                ),
                ("accept-language".to_owned(), "en-US".to_owned()),
                ("user-agent".to_owned(), "Mozilla/5.0".to_owned()),
            ]
        );
    }
}
