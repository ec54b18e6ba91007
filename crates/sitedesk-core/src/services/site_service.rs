// ============================================================================
// SiteDesk Core - Site Service
// File: crates/sitedesk-core/src/services/site_service.rs
// ============================================================================
//! Site CRUD. Same template as clients except removal: sites are
//! soft-deleted so historic projects and quotations keep their reference.

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use sitedesk_shared::Patch;

use crate::domain::Site;
use crate::error::DomainError;
use crate::repositories::SiteRepository;

#[derive(Debug, Clone, Deserialize)]
pub struct NewSite {
    pub name: String,
    pub client_id: Option<Uuid>,
    pub address: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SitePatch {
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub client_id: Patch<Uuid>,
    #[serde(default)]
    pub address: Patch<String>,
    #[serde(default)]
    pub city: Patch<String>,
    #[serde(default)]
    pub is_active: Patch<bool>,
}

pub struct SiteService<R: SiteRepository> {
    repo: Arc<R>,
}

impl<R: SiteRepository> SiteService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, tenant_id: &Uuid) -> Result<Vec<Site>, DomainError> {
        self.repo.list(tenant_id).await
    }

    pub async fn get(&self, id: &Uuid, tenant_id: &Uuid) -> Result<Option<Site>, DomainError> {
        self.repo.find_by_id(id, tenant_id).await
    }

    pub async fn create(
        &self,
        tenant_id: &Uuid,
        user_id: &Uuid,
        req: NewSite,
    ) -> Result<Site, DomainError> {
        let mut site = Site::new(*tenant_id, req.name, req.client_id, *user_id)?;
        site.address = req.address;
        site.city = req.city;

        let created = self.repo.create(&site).await?;
        info!("Site created: {} ({})", created.name, created.id);
        Ok(created)
    }

    pub async fn update(
        &self,
        id: &Uuid,
        tenant_id: &Uuid,
        user_id: &Uuid,
        patch: SitePatch,
    ) -> Result<Option<Site>, DomainError> {
        let Some(mut site) = self.repo.find_by_id(id, tenant_id).await? else {
            return Ok(None);
        };

        patch.name.overwrite(&mut site.name);
        patch.client_id.apply_to(&mut site.client_id);
        patch.address.apply_to(&mut site.address);
        patch.city.apply_to(&mut site.city);
        patch.is_active.overwrite(&mut site.is_active);
        site.validate().map_err(DomainError::from)?;
        site.touch(*user_id);

        Ok(Some(self.repo.update(&site).await?))
    }

    /// Soft delete; the row stays and `is_active` flips.
    pub async fn delete(&self, id: &Uuid, tenant_id: &Uuid) -> Result<bool, DomainError> {
        self.repo.deactivate(id, tenant_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::site_repository::MockSiteRepository;

    #[tokio::test]
    async fn delete_goes_through_deactivate_not_hard_delete() {
        let mut repo = MockSiteRepository::new();
        repo.expect_deactivate().times(1).returning(|_, _| Ok(true));

        let svc = SiteService::new(Arc::new(repo));
        assert!(svc.delete(&Uuid::new_v4(), &Uuid::new_v4()).await.unwrap());
    }

    #[tokio::test]
    async fn cross_tenant_update_is_not_found() {
        let mut repo = MockSiteRepository::new();
        repo.expect_find_by_id().returning(|_, _| Ok(None));

        let svc = SiteService::new(Arc::new(repo));
        let updated = svc
            .update(&Uuid::new_v4(), &Uuid::new_v4(), &Uuid::new_v4(), SitePatch::default())
            .await
            .unwrap();
        assert!(updated.is_none());
    }
}
