//! Session token encoding and decoding with HS256.
//!
//! Tokens are signed with a shared secret held in process configuration.
//! Decoding validates the signature and expiration with a small leeway
//! for clock skew; all failure modes map to [`AuthError`] variants so
//! callers can treat any failure as "unauthenticated" at the boundary.

use crate::claims::Claims;
use crate::error::AuthError;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

/// Leeway in seconds for exp/iat validation (clock skew tolerance).
const LEEWAY_SECS: u64 = 60;

/// Encode claims into a signed HS256 token string.
///
/// # Errors
///
/// Returns `AuthError::InvalidToken` if encoding fails.
pub fn encode_token(claims: &Claims, secret: &[u8]) -> Result<String, AuthError> {
    let key = EncodingKey::from_secret(secret);
    let header = Header::new(Algorithm::HS256);

    encode(&header, claims, &key)
        .map_err(|e| AuthError::InvalidToken(format!("Encoding failed: {e}")))
}

/// Decode and validate a session token.
///
/// # Errors
///
/// - `AuthError::TokenExpired` - token has expired
/// - `AuthError::InvalidSignature` - signature verification failed
/// - `AuthError::InvalidToken` - token format is invalid
pub fn decode_token(token: &str, secret: &[u8]) -> Result<Claims, AuthError> {
    let key = DecodingKey::from_secret(secret);

    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = LEEWAY_SECS;
    // Only accept HS256
    validation.algorithms = vec![Algorithm::HS256];
    validation.validate_aud = false;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(map_jwt_error)?;

    Ok(token_data.claims)
}

/// Map jsonwebtoken errors to [`AuthError`].
fn map_jwt_error(err: jsonwebtoken::errors::Error) -> AuthError {
    use jsonwebtoken::errors::ErrorKind;

    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        ErrorKind::InvalidAlgorithm => AuthError::InvalidToken("Unsupported algorithm".to_string()),
        ErrorKind::InvalidToken => AuthError::InvalidToken("Malformed token".to_string()),
        ErrorKind::Base64(_) => AuthError::InvalidToken("Invalid base64 encoding".to_string()),
        ErrorKind::Json(_) => AuthError::InvalidToken("Invalid JSON in claims".to_string()),
        ErrorKind::MissingRequiredClaim(claim) => AuthError::MissingClaim(claim.to_string()),
        _ => AuthError::InvalidToken(format!("Token validation failed: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use grantflow_core::UserId;

    const TEST_SECRET: &[u8] = b"unit-test-signing-secret-32-bytes!!";
    const WRONG_SECRET: &[u8] = b"a-different-signing-secret-entirely";

    fn test_claims() -> Claims {
        Claims::builder()
            .subject(UserId::new())
            .role("viewer")
            .expires_in_secs(3600)
            .build()
    }

    #[test]
    fn encode_produces_three_parts() {
        let token = encode_token(&test_claims(), TEST_SECRET).unwrap();
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn round_trip_preserves_claims() {
        let original = Claims::builder()
            .subject(UserId::new())
            .role("admin")
            .email("admin@example.com")
            .expires_in_secs(3600)
            .build();

        let token = encode_token(&original, TEST_SECRET).unwrap();
        let decoded = decode_token(&token, TEST_SECRET).unwrap();

        assert_eq!(decoded.sub, original.sub);
        assert_eq!(decoded.role, original.role);
        assert_eq!(decoded.email, original.email);
        assert_eq!(decoded.jti, original.jti);
        assert_eq!(decoded.exp, original.exp);
    }

    #[test]
    fn expired_token_rejected() {
        let claims = Claims::builder()
            .subject(UserId::new())
            .expiration(Utc::now().timestamp() - 3600)
            .build();

        let token = encode_token(&claims, TEST_SECRET).unwrap();
        let result = decode_token(&token, TEST_SECRET);

        assert!(matches!(result.unwrap_err(), AuthError::TokenExpired));
    }

    #[test]
    fn expiry_within_leeway_accepted() {
        // Expired 30 seconds ago, inside the 60 second leeway.
        let claims = Claims::builder()
            .subject(UserId::new())
            .expiration(Utc::now().timestamp() - 30)
            .build();

        let token = encode_token(&claims, TEST_SECRET).unwrap();
        assert!(decode_token(&token, TEST_SECRET).is_ok());
    }

    #[test]
    fn wrong_secret_rejected() {
        let token = encode_token(&test_claims(), TEST_SECRET).unwrap();
        let result = decode_token(&token, WRONG_SECRET);

        assert!(matches!(result.unwrap_err(), AuthError::InvalidSignature));
    }

    #[test]
    fn malformed_token_rejected() {
        let result = decode_token("not.a.valid.token", TEST_SECRET);
        assert!(matches!(result.unwrap_err(), AuthError::InvalidToken(_)));
    }

    #[test]
    fn tampered_payload_rejected() {
        let token = encode_token(&test_claims(), TEST_SECRET).unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        let tampered_payload = "eyJzdWIiOiJvdGhlciJ9";
        parts[1] = tampered_payload;
        let tampered = parts.join(".");

        assert!(decode_token(&tampered, TEST_SECRET).is_err());
    }
}
