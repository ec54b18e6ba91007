//! JWT token handling
//!
//! Every authenticated request carries a bearer token whose claims identify
//! the user, the role, and the tenant the request is scoped to. The tenant id
//! claim is the sole source of tenant scoping; it is never read from request
//! payloads.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Token creation failed: {0}")]
    CreationError(String),
    #[error("Token validation failed: {0}")]
    ValidationError(String),
    #[error("Token expired")]
    TokenExpired,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub tenant_id: Uuid,
    pub tenant_name: String,
    pub iat: i64,
    pub exp: i64,
}

pub struct JwtService {
    secret: String,
    token_expiry: i64,
}

impl JwtService {
    pub fn new(secret: String, token_expiry: i64) -> Self {
        Self { secret, token_expiry }
    }

    pub fn generate_token(
        &self,
        user_id: &Uuid,
        name: &str,
        email: &str,
        role: &str,
        tenant_id: &Uuid,
        tenant_name: &str,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            tenant_id: *tenant_id,
            tenant_name: tenant_name.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.token_expiry)).timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| JwtError::CreationError(e.to_string()))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
            _ => JwtError::ValidationError(e.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trip_preserves_tenant_claim() {
        let service = JwtService::new("test-secret".to_string(), 28_800);
        let user_id = Uuid::new_v4();
        let tenant_id = Uuid::new_v4();

        let token = service
            .generate_token(&user_id, "Admin User", "admin@acme.test", "Admin", &tenant_id, "Acme")
            .unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.tenant_id, tenant_id);
        assert_eq!(claims.role, "Admin");
        assert_eq!(claims.tenant_name, "Acme");
        assert_eq!(claims.exp - claims.iat, 28_800);
    }

    #[test]
    fn token_with_wrong_secret_is_rejected() {
        let issuer = JwtService::new("secret-a".to_string(), 3600);
        let verifier = JwtService::new("secret-b".to_string(), 3600);
        let user_id = Uuid::new_v4();
        let tenant_id = Uuid::new_v4();

        let token = issuer
            .generate_token(&user_id, "u", "u@t.test", "Worker", &tenant_id, "T")
            .unwrap();
        assert!(verifier.validate_token(&token).is_err());
    }
}
