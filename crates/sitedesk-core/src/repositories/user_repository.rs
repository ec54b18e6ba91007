//! User repository trait (port)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::User;
use crate::error::DomainError;

/// Username and email lookups here are deliberately cross-tenant: login
/// happens before a tenant is known, and registration enforces global email
/// uniqueness.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;
    async fn email_exists(&self, email: &str) -> Result<bool, DomainError>;
    async fn record_login(&self, id: &Uuid, at: DateTime<Utc>) -> Result<(), DomainError>;
}
