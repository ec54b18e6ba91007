//! Bearer-token extractor.
//!
//! `AuthUser` is the only way handlers obtain a tenant id; it comes from the
//! verified token claims, never from the path or payload.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use uuid::Uuid;

use sitedesk_core::domain::UserRole;
use sitedesk_security::jwt::JwtService;

use crate::error::ApiFailure;
use crate::state::SharedState;

/// The authenticated caller, as asserted by the bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub tenant_id: Uuid,
    pub tenant_name: String,
    pub role: UserRole,
}

impl AuthUser {
    /// Role gate; failure is 403, distinct from the 404 used for
    /// tenant-scoped misses.
    pub fn require_role(&self, allowed: &[UserRole]) -> Result<(), ApiFailure> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            Err(ApiFailure::forbidden())
        }
    }
}

impl FromRequestParts<SharedState> for AuthUser {
    type Rejection = ApiFailure;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiFailure::unauthorized("Missing bearer token"))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiFailure::unauthorized("Malformed Authorization header"))?;

        let jwt = JwtService::new(
            state.config.jwt.secret.clone(),
            state.config.jwt.token_expiry,
        );
        let claims = jwt
            .validate_token(token)
            .map_err(|_| ApiFailure::unauthorized("Invalid or expired token"))?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| ApiFailure::unauthorized("Invalid token subject"))?;
        let role = UserRole::from_str(&claims.role)
            .ok_or_else(|| ApiFailure::unauthorized("Unknown role claim"))?;

        Ok(AuthUser {
            user_id,
            tenant_id: claims.tenant_id,
            tenant_name: claims.tenant_name,
            role,
        })
    }
}
