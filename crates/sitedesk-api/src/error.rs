//! Domain error to HTTP status mapping.
//!
//! NotFound covers both genuinely missing ids and ids owned by another
//! tenant; the response body never says which. Forbidden is reserved for
//! failed role checks and is deliberately distinguishable from NotFound.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use sitedesk_core::error::DomainError;

use crate::response::ApiResponse;

#[derive(Debug)]
pub struct ApiFailure {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiFailure {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", "Resource not found")
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", message)
    }

    pub fn forbidden() -> Self {
        Self::new(StatusCode::FORBIDDEN, "FORBIDDEN", "Insufficient permissions")
    }

    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, message)
    }
}

impl From<DomainError> for ApiFailure {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound => Self::not_found(),
            DomainError::InvalidCredentials
            | DomainError::UserNotActive
            | DomainError::TenantNotActive => Self::unauthorized("Invalid credentials"),
            DomainError::Forbidden => Self::forbidden(),
            DomainError::EmailAlreadyExists(_)
            | DomainError::UsernameAlreadyExists(_)
            | DomainError::DuplicateKey(_) => Self::bad_request("DUPLICATE", &e.to_string()),
            DomainError::InsufficientStock { .. } => {
                Self::bad_request("INSUFFICIENT_STOCK", &e.to_string())
            }
            DomainError::ValidationError(msg) => Self::bad_request("VALIDATION_ERROR", msg),
            DomainError::PasswordHashError(_)
            | DomainError::TokenGenerationError(_)
            | DomainError::DatabaseError(_)
            | DomainError::InternalError(_) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Internal server error",
            ),
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ApiResponse::<()>::error(self.code, &self.message)),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn cross_tenant_miss_maps_to_404_not_403() {
        let failure = ApiFailure::from(DomainError::NotFound);
        assert_eq!(failure.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn role_failure_maps_to_403() {
        let failure = ApiFailure::from(DomainError::Forbidden);
        assert_eq!(failure.status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn credential_failures_map_to_401_without_detail() {
        for e in [
            DomainError::InvalidCredentials,
            DomainError::UserNotActive,
            DomainError::TenantNotActive,
        ] {
            let failure = ApiFailure::from(e);
            assert_eq!(failure.status, StatusCode::UNAUTHORIZED);
            assert_eq!(failure.message, "Invalid credentials");
        }
    }

    #[test]
    fn business_rule_violations_map_to_400() {
        let failure = ApiFailure::from(DomainError::InsufficientStock {
            requested: Decimal::TEN,
            available: Decimal::ONE,
        });
        assert_eq!(failure.status, StatusCode::BAD_REQUEST);
        assert_eq!(failure.code, "INSUFFICIENT_STOCK");

        let failure = ApiFailure::from(DomainError::EmailAlreadyExists("a@b.c".to_string()));
        assert_eq!(failure.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn internal_errors_hide_their_detail() {
        let failure = ApiFailure::from(DomainError::DatabaseError("secret dsn".to_string()));
        assert_eq!(failure.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!failure.message.contains("secret"));
    }
}
