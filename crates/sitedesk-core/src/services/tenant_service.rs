// ============================================================================
// SiteDesk Core - Tenant Service
// File: crates/sitedesk-core/src/services/tenant_service.rs
// ============================================================================
//! Tenant administration. Listing is the one cross-tenant read in the
//! system and requires the Admin role; a failed role check is `Forbidden`,
//! which is deliberately distinct from the `NotFound` used for tenant
//! misses elsewhere.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use crate::domain::{Tenant, UserRole};
use crate::error::DomainError;
use crate::repositories::TenantRepository;

const ADMIN_ROLES: &[UserRole] = &[UserRole::Admin];

pub struct TenantService<R: TenantRepository> {
    repo: Arc<R>,
}

impl<R: TenantRepository> TenantService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, caller_role: UserRole) -> Result<Vec<Tenant>, DomainError> {
        Self::require_admin(caller_role)?;
        self.repo.list().await
    }

    pub async fn get(
        &self,
        id: &Uuid,
        caller_role: UserRole,
        caller_tenant_id: &Uuid,
    ) -> Result<Option<Tenant>, DomainError> {
        // Admins may inspect any tenant; everyone else only their own.
        if !ADMIN_ROLES.contains(&caller_role) && id != caller_tenant_id {
            return Err(DomainError::Forbidden);
        }
        self.repo.find_by_id(id).await
    }

    /// Soft delete. Tenants are never hard-deleted while referenced.
    pub async fn deactivate(&self, id: &Uuid, caller_role: UserRole) -> Result<bool, DomainError> {
        Self::require_admin(caller_role)?;
        self.repo.deactivate(id).await
    }

    fn require_admin(role: UserRole) -> Result<(), DomainError> {
        if ADMIN_ROLES.contains(&role) {
            Ok(())
        } else {
            warn!("Tenant admin operation refused for role {}", role.as_str());
            Err(DomainError::Forbidden)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SubscriptionPlan;
    use crate::repositories::tenant_repository::MockTenantRepository;

    #[tokio::test]
    async fn list_requires_admin_role() {
        let mut repo = MockTenantRepository::new();
        repo.expect_list().returning(|| {
            Ok(vec![Tenant::new("Acme".to_string(), SubscriptionPlan::Free).unwrap()])
        });

        let svc = TenantService::new(Arc::new(repo));
        assert_eq!(svc.list(UserRole::Admin).await.unwrap().len(), 1);

        let err = svc.list(UserRole::Accountant).await.unwrap_err();
        assert!(matches!(err, DomainError::Forbidden));
    }

    #[tokio::test]
    async fn non_admin_cannot_read_other_tenants() {
        let repo = MockTenantRepository::new();
        let svc = TenantService::new(Arc::new(repo));

        let own = Uuid::new_v4();
        let other = Uuid::new_v4();
        let err = svc.get(&other, UserRole::Worker, &own).await.unwrap_err();
        assert!(matches!(err, DomainError::Forbidden));
    }
}
