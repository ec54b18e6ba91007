//! Tenant repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Tenant, User};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TenantRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Tenant>, DomainError>;
    /// Cross-tenant listing; callers must gate this behind the Admin role.
    async fn list(&self) -> Result<Vec<Tenant>, DomainError>;
    /// Create a tenant together with its first (Admin) user in one
    /// transaction. Registration must never leave a tenant without an admin.
    async fn create_with_admin(
        &self,
        tenant: &Tenant,
        admin: &User,
    ) -> Result<(Tenant, User), DomainError>;
    /// Soft delete: flip `is_active`, set `removed_at`.
    async fn deactivate(&self, id: &Uuid) -> Result<bool, DomainError>;
}
