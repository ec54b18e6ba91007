//! Domain errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Missing rows and rows owned by another tenant are deliberately
    /// indistinguishable.
    #[error("Not found")]
    NotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not active")]
    UserNotActive,

    #[error("Tenant not active")]
    TenantNotActive,

    #[error("Forbidden")]
    Forbidden,

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Username already exists: {0}")]
    UsernameAlreadyExists(String),

    #[error("Duplicate value for {0}")]
    DuplicateKey(String),

    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock {
        requested: rust_decimal::Decimal,
        available: rust_decimal::Decimal,
    },

    #[error("Password hash error: {0}")]
    PasswordHashError(String),

    #[error("Token generation error: {0}")]
    TokenGenerationError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(e: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(e.to_string())
    }
}
