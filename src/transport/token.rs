//! Continuation-token codec: claims are JSON-serialized then base64-encoded
//! so callers can hold them as a single opaque string between the send and
//! verify steps.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

use crate::domain::ContinuationClaims;

use super::TransportError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Wire shape of the claims. The camelCase field names keep tokens
/// byte-compatible with those issued by earlier client implementations.
struct TokenClaimsJson {
    login_verification_request_id: String,
    login_verification_user_id: String,
    phone_number: String,
}

/// Encode claims into an opaque registration token.
pub fn encode_continuation_token(claims: &ContinuationClaims) -> Result<String, TransportError> {
    let wire = TokenClaimsJson {
        login_verification_request_id: claims.login_verification_request_id.clone(),
        login_verification_user_id: claims.login_verification_user_id.clone(),
        phone_number: claims.phone_number.clone(),
    };
    let json = serde_json::to_string(&wire)?;
    Ok(BASE64.encode(json))
}

/// Check the token is well-formed base64 and return the decoded bytes.
///
/// Kept separate from claim decoding: a base64 failure is caller input error
/// (400-class), while undecodable claims inside valid base64 are a parse
/// failure (500-class).
pub fn decode_token_bytes(token: &str) -> Result<Vec<u8>, base64::DecodeError> {
    BASE64.decode(token)
}

/// Decode previously validated token bytes back into claims.
pub fn decode_continuation_claims(bytes: &[u8]) -> Result<ContinuationClaims, TransportError> {
    let wire: TokenClaimsJson = serde_json::from_slice(bytes)?;
    Ok(ContinuationClaims {
        login_verification_request_id: wire.login_verification_request_id,
        login_verification_user_id: wire.login_verification_user_id,
        phone_number: wire.phone_number,
    })
}
