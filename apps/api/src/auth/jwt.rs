use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

const TOKEN_TTL_DAYS: i64 = 7;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
    iat: i64,
}

/// Issues an HS256 access token for `user_id`.
pub fn create_access_token(user_id: i64, secret: &str) -> Result<String, AppError> {
    create_token_with_ttl(user_id, secret, Duration::days(TOKEN_TTL_DAYS))
}

fn create_token_with_ttl(user_id: i64, secret: &str, ttl: Duration) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        exp: (now + ttl).timestamp(),
        iat: now.timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to sign token: {e}")))
}

/// Verifies a token and returns the user id it was issued for.
/// Expiry and signature failures map to distinct error codes.
pub fn decode_access_token(token: &str, secret: &str) -> Result<i64, AppError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::TokenExpired,
        _ => AppError::InvalidToken,
    })?;

    data.claims.sub.parse::<i64>().map_err(|_| AppError::InvalidToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_token_round_trip() {
        let token = create_access_token(42, SECRET).unwrap();
        assert_eq!(decode_access_token(&token, SECRET).unwrap(), 42);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_access_token(42, SECRET).unwrap();
        let err = decode_access_token(&token, "other-secret").unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }

    #[test]
    fn test_expired_token_rejected() {
        // Default validation allows 60s leeway; go well past it.
        let token = create_token_with_ttl(42, SECRET, Duration::seconds(-300)).unwrap();
        let err = decode_access_token(&token, SECRET).unwrap_err();
        assert!(matches!(err, AppError::TokenExpired));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let err = decode_access_token("not-a-jwt", SECRET).unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }
}
