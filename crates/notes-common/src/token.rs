//! JWT claim decoding.
//!
//! The client never verifies signatures; it only needs the `exp` claim to
//! decide whether the access token should be refreshed. A token that does not
//! decode, or has no numeric `exp`, is treated as invalid.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token must have three segments, found {0}")]
    Malformed(usize),
    #[error("payload is not valid base64url")]
    Base64,
    #[error("payload is not valid JSON: {0}")]
    Json(String),
    #[error("token has no exp claim")]
    MissingExpiry,
}

/// The subset of claims the client cares about.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Claims {
    /// Expiry, seconds since the Unix epoch. May be fractional.
    pub exp: Option<f64>,
}

impl Claims {
    /// `true` when the expiry lies strictly before `now_secs`.
    pub fn is_expired_at(&self, now_secs: f64) -> Result<bool, TokenError> {
        let exp = self.exp.ok_or(TokenError::MissingExpiry)?;
        Ok(exp < now_secs)
    }
}

/// Decode the payload segment of a JWT without checking the signature.
pub fn decode_claims(token: &str) -> Result<Claims, TokenError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(TokenError::Malformed(segments.len()));
    }

    // Tolerate padded payloads; the engine itself rejects '='.
    let payload = segments[1].trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| TokenError::Base64)?;

    serde_json::from_slice(&bytes).map_err(|e| TokenError::Json(e.to_string()))
}

/// Decode and return the `exp` claim.
pub fn expiry(token: &str) -> Result<f64, TokenError> {
    decode_claims(token)?.exp.ok_or(TokenError::MissingExpiry)
}

/// Build an unsigned token carrying the given claims. Test helper for code
/// that needs tokens with a specific expiry.
pub fn encode_unsigned(claims: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.signature")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_exp_from_payload() {
        let token = encode_unsigned(&json!({"exp": 1_700_000_000, "user_id": 3}));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.exp, Some(1_700_000_000.0));
    }

    #[test]
    fn expired_only_when_strictly_before_now() {
        let claims = decode_claims(&encode_unsigned(&json!({"exp": 100}))).unwrap();
        assert!(claims.is_expired_at(200.0).unwrap());
        assert!(!claims.is_expired_at(100.0).unwrap());
        assert!(!claims.is_expired_at(99.5).unwrap());
    }

    #[test]
    fn missing_exp_fails_closed() {
        let token = encode_unsigned(&json!({"user_id": 1}));
        assert_eq!(expiry(&token), Err(TokenError::MissingExpiry));
    }

    #[test]
    fn rejects_wrong_segment_count() {
        assert_eq!(decode_claims("not-a-jwt"), Err(TokenError::Malformed(1)));
        assert_eq!(decode_claims("a.b"), Err(TokenError::Malformed(2)));
    }

    #[test]
    fn rejects_garbage_payload() {
        assert_eq!(decode_claims("aaa.!!!.ccc"), Err(TokenError::Base64));

        let not_json = URL_SAFE_NO_PAD.encode("hello");
        let token = format!("h.{not_json}.s");
        assert!(matches!(decode_claims(&token), Err(TokenError::Json(_))));
    }

    #[test]
    fn accepts_padded_payload() {
        let payload = base64::engine::general_purpose::URL_SAFE.encode(r#"{"exp":5}"#);
        let token = format!("h.{payload}.s");
        assert_eq!(expiry(&token), Ok(5.0));
    }
}
