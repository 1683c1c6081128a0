use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::Role;

/// Token payload: subject id, email and role, plus expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: Role,
    pub exp: i64,
}

/// Issues and validates session tokens and hashes passwords. Cloned into
/// every handler via application state; holds no mutable state.
#[derive(Clone)]
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry_minutes: i64,
}

impl AuthService {
    pub fn new(secret: &str, token_expiry_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_expiry_minutes,
        }
    }

    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        bcrypt::hash(password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to hash password: {}", e)))
    }

    pub fn verify_password(&self, password: &str, hashed: &str) -> Result<bool, AppError> {
        bcrypt::verify(password, hashed)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to verify password: {}", e)))
    }

    pub fn issue_token(&self, user_id: &str, email: &str, role: Role) -> Result<String, AppError> {
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            role,
            exp: (Utc::now() + Duration::minutes(self.token_expiry_minutes)).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to issue token: {}", e)))
    }

    /// The `requireAuthenticated` predicate: rejects missing signatures,
    /// malformed tokens and expired tokens with an Unauthenticated error.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthenticated("Invalid or expired token".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        AuthService::new("test-secret", 60)
    }

    #[test]
    fn issued_tokens_verify_and_carry_identity() {
        let auth = service();
        let token = auth.issue_token("user-1", "ali@example.com", Role::Admin).unwrap();
        let claims = auth.verify_token(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email, "ali@example.com");
        assert_eq!(claims.role, Role::Admin);
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        let auth = service();
        assert!(matches!(
            auth.verify_token("not-a-token"),
            Err(AppError::Unauthenticated(_))
        ));
    }

    #[test]
    fn tokens_signed_with_another_key_are_rejected() {
        let token = service().issue_token("user-1", "ali@example.com", Role::User).unwrap();
        let other = AuthService::new("different-secret", 60);
        assert!(matches!(
            other.verify_token(&token),
            Err(AppError::Unauthenticated(_))
        ));
    }

    #[test]
    fn expired_tokens_are_rejected() {
        // Negative expiry puts exp in the past.
        let auth = AuthService::new("test-secret", -10);
        let token = auth.issue_token("user-1", "ali@example.com", Role::User).unwrap();
        assert!(matches!(
            auth.verify_token(&token),
            Err(AppError::Unauthenticated(_))
        ));
    }

    #[test]
    fn password_hash_verifies_original_only() {
        let auth = service();
        let hash = auth.hash_password("s3cret").unwrap();
        assert!(auth.verify_password("s3cret", &hash).unwrap());
        assert!(!auth.verify_password("wrong", &hash).unwrap());
    }
}
