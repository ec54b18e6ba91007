//! Client repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Client;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn list(&self, tenant_id: &Uuid) -> Result<Vec<Client>, DomainError>;
    async fn find_by_id(&self, id: &Uuid, tenant_id: &Uuid) -> Result<Option<Client>, DomainError>;
    async fn create(&self, client: &Client) -> Result<Client, DomainError>;
    async fn update(&self, client: &Client) -> Result<Client, DomainError>;
    /// Hard delete, scoped by tenant. Returns false when no row matched.
    async fn delete(&self, id: &Uuid, tenant_id: &Uuid) -> Result<bool, DomainError>;
}
