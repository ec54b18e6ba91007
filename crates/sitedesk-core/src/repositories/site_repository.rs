//! Site repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Site;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SiteRepository: Send + Sync {
    async fn list(&self, tenant_id: &Uuid) -> Result<Vec<Site>, DomainError>;
    async fn find_by_id(&self, id: &Uuid, tenant_id: &Uuid) -> Result<Option<Site>, DomainError>;
    async fn create(&self, site: &Site) -> Result<Site, DomainError>;
    async fn update(&self, site: &Site) -> Result<Site, DomainError>;
    /// Soft delete: flip `is_active`. Returns false when no row matched.
    async fn deactivate(&self, id: &Uuid, tenant_id: &Uuid) -> Result<bool, DomainError>;
}
