//! HS256 bearer-token verification
//!
//! Tokens are signed with a shared secret by the login service; this module
//! only verifies. `jsonwebtoken`'s default validation enforces `exp`, so an
//! expired token fails decode before any claim is inspected.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tripdesk_core::{AppError, Claims};

/// Verify a raw token string and return its claims.
///
/// Fails with `Unauthorized` on bad signature, malformed token, or expiry.
/// The jsonwebtoken error detail is folded into the message for logs; the
/// HTTP layer never echoes it.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    let validation = Validation::new(Algorithm::HS256);
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::Unauthorized(format!("Token validation failed: {}", e)))
}

/// Mint a signed token. Token issuance endpoints are out of scope for this
/// service; this exists for tests and local tooling.
pub fn mint_token(
    sub: &str,
    name: &str,
    secret: &str,
    ttl: Duration,
) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        sub: sub.to_string(),
        name: name.to_string(),
        exp: (now + ttl).timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-with-enough-length";

    #[test]
    fn round_trip_valid_token() {
        let token = mint_token("traveler@example.com", "Traveler", SECRET, Duration::hours(1))
            .unwrap();
        let claims = verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, "traveler@example.com");
        assert_eq!(claims.name, "Traveler");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token =
            mint_token("traveler@example.com", "Traveler", SECRET, Duration::hours(1)).unwrap();
        let err = verify_token(&token, "a-different-secret-entirely").unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = mint_token(
            "traveler@example.com",
            "Traveler",
            SECRET,
            Duration::seconds(-3600),
        )
        .unwrap();
        let err = verify_token(&token, SECRET).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn garbage_token_is_rejected() {
        let err = verify_token("not-a-jwt-at-all", SECRET).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
