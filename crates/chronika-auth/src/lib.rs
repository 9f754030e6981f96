//! Password hashing and JWT issuance/validation.
//!
//! bcrypt is deliberately slow — run [`hash_password`]/[`verify_password`]
//! under `spawn_blocking` from async handlers. Tokens are HS256 with an
//! access/refresh split; the refresh endpoint must reject access tokens and
//! vice versa, so the type is part of the claims.

use chrono::Utc;
use chronika_core::error::{ChronikaError, Result};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

pub const TOKEN_ACCESS: &str = "access";
pub const TOKEN_REFRESH: &str = "refresh";

/// JWT claims carried by every Chronika token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub username: String,
    pub role: String,
    /// "access" or "refresh".
    pub token_type: String,
    pub iat: i64,
    pub exp: i64,
}

pub fn hash_password(password: &str) -> Result<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| ChronikaError::Auth(format!("Hash error: {e}")))
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

/// Issue a token of the given type.
pub fn create_token(
    user_id: &str,
    username: &str,
    role: &str,
    token_type: &str,
    ttl_secs: i64,
    secret: &str,
) -> Result<String> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        role: role.to_string(),
        token_type: token_type.to_string(),
        iat: now,
        exp: now + ttl_secs,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| ChronikaError::Auth(format!("Token error: {e}")))
}

/// Validate signature and expiry, returning the claims.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| ChronikaError::Auth(format!("Invalid token: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_password_roundtrip() {
        let hash = hash_password("correct horse").unwrap();
        assert_ne!(hash, "correct horse");
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("wrong horse", &hash));
    }

    #[test]
    fn test_verify_garbage_hash_is_false() {
        assert!(!verify_password("password", "not-a-bcrypt-hash"));
    }

    #[test]
    fn test_token_roundtrip() {
        let token = create_token("u-1", "historian", "user", TOKEN_ACCESS, 3600, SECRET).unwrap();
        let claims = validate_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, "u-1");
        assert_eq!(claims.username, "historian");
        assert_eq!(claims.role, "user");
        assert_eq!(claims.token_type, TOKEN_ACCESS);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token("u-1", "historian", "user", TOKEN_ACCESS, 3600, SECRET).unwrap();
        assert!(validate_token(&token, "other-secret").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        // expired beyond the default validation leeway
        let token = create_token("u-1", "historian", "user", TOKEN_ACCESS, -3600, SECRET).unwrap();
        let err = validate_token(&token, SECRET).unwrap_err();
        assert!(matches!(err, ChronikaError::Auth(_)));
    }

    #[test]
    fn test_token_types_are_distinct() {
        let access = create_token("u-1", "h", "user", TOKEN_ACCESS, 3600, SECRET).unwrap();
        let refresh = create_token("u-1", "h", "user", TOKEN_REFRESH, 3600, SECRET).unwrap();
        assert_eq!(validate_token(&access, SECRET).unwrap().token_type, TOKEN_ACCESS);
        assert_eq!(validate_token(&refresh, SECRET).unwrap().token_type, TOKEN_REFRESH);
    }
}
