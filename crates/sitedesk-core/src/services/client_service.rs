// ============================================================================
// SiteDesk Core - Client Service
// File: crates/sitedesk-core/src/services/client_service.rs
// ============================================================================
//! Client CRUD. This is the worked example of the generic tenant-scoped
//! entity slice: list and get are tenant-filtered, create stamps the caller's
//! tenant, update re-fetches under the caller's tenant before mutating, and
//! delete is a tenant-scoped hard delete.

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use sitedesk_shared::Patch;

use crate::domain::Client;
use crate::error::DomainError;
use crate::repositories::ClientRepository;

#[derive(Debug, Clone, Deserialize)]
pub struct NewClient {
    pub name: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub gst_number: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientPatch {
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub contact_person: Patch<String>,
    #[serde(default)]
    pub email: Patch<String>,
    #[serde(default)]
    pub phone: Patch<String>,
    #[serde(default)]
    pub address: Patch<String>,
    #[serde(default)]
    pub gst_number: Patch<String>,
}

pub struct ClientService<R: ClientRepository> {
    repo: Arc<R>,
}

impl<R: ClientRepository> ClientService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, tenant_id: &Uuid) -> Result<Vec<Client>, DomainError> {
        self.repo.list(tenant_id).await
    }

    pub async fn get(&self, id: &Uuid, tenant_id: &Uuid) -> Result<Option<Client>, DomainError> {
        self.repo.find_by_id(id, tenant_id).await
    }

    pub async fn create(
        &self,
        tenant_id: &Uuid,
        user_id: &Uuid,
        req: NewClient,
    ) -> Result<Client, DomainError> {
        // Tenant id comes from the caller's claims, never the payload.
        let mut client = Client::new(*tenant_id, req.name, *user_id)?;
        client.contact_person = req.contact_person;
        client.email = req.email;
        client.phone = req.phone;
        client.address = req.address;
        client.gst_number = req.gst_number;
        client.validate().map_err(DomainError::from)?;

        let created = self.repo.create(&client).await?;
        info!("Client created: {} ({})", created.name, created.id);
        Ok(created)
    }

    pub async fn update(
        &self,
        id: &Uuid,
        tenant_id: &Uuid,
        user_id: &Uuid,
        patch: ClientPatch,
    ) -> Result<Option<Client>, DomainError> {
        let Some(mut client) = self.repo.find_by_id(id, tenant_id).await? else {
            return Ok(None);
        };

        patch.name.overwrite(&mut client.name);
        patch.contact_person.apply_to(&mut client.contact_person);
        patch.email.apply_to(&mut client.email);
        patch.phone.apply_to(&mut client.phone);
        patch.address.apply_to(&mut client.address);
        patch.gst_number.apply_to(&mut client.gst_number);
        client.validate().map_err(DomainError::from)?;
        client.touch(*user_id);

        Ok(Some(self.repo.update(&client).await?))
    }

    pub async fn delete(&self, id: &Uuid, tenant_id: &Uuid) -> Result<bool, DomainError> {
        self.repo.delete(id, tenant_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::client_repository::MockClientRepository;

    fn stored_client(tenant_id: Uuid) -> Client {
        let mut c = Client::new(tenant_id, "Acme Corp".to_string(), Uuid::new_v4()).unwrap();
        c.phone = Some("555-0100".to_string());
        c
    }

    #[tokio::test]
    async fn cross_tenant_lookup_is_not_found() {
        let mut repo = MockClientRepository::new();
        repo.expect_find_by_id().returning(|_, _| Ok(None));
        repo.expect_delete().returning(|_, _| Ok(false));

        let svc = ClientService::new(Arc::new(repo));
        let other_tenant = Uuid::new_v4();
        let id = Uuid::new_v4();

        assert!(svc.get(&id, &other_tenant).await.unwrap().is_none());
        assert!(svc
            .update(&id, &other_tenant, &Uuid::new_v4(), ClientPatch::default())
            .await
            .unwrap()
            .is_none());
        assert!(!svc.delete(&id, &other_tenant).await.unwrap());
    }

    #[tokio::test]
    async fn repeated_reads_return_the_same_data_and_touch_no_write_methods() {
        let tenant_id = Uuid::new_v4();
        let client = stored_client(tenant_id);

        // Only read expectations are registered; a call to create, update,
        // or delete would panic as unexpected.
        let mut repo = MockClientRepository::new();
        let c = client.clone();
        repo.expect_find_by_id()
            .times(2)
            .returning(move |_, _| Ok(Some(c.clone())));
        let l = client.clone();
        repo.expect_list()
            .times(2)
            .returning(move |_| Ok(vec![l.clone()]));

        let svc = ClientService::new(Arc::new(repo));

        let first = svc.get(&client.id, &tenant_id).await.unwrap().unwrap();
        let second = svc.get(&client.id, &tenant_id).await.unwrap().unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(first.name, second.name);
        assert_eq!(first.updated_at, second.updated_at);

        let list_a = svc.list(&tenant_id).await.unwrap();
        let list_b = svc.list(&tenant_id).await.unwrap();
        assert_eq!(list_a.len(), list_b.len());
        assert_eq!(list_a[0].id, list_b[0].id);
    }

    #[tokio::test]
    async fn create_stamps_callers_tenant() {
        let tenant_id = Uuid::new_v4();

        let mut repo = MockClientRepository::new();
        repo.expect_create()
            .withf(move |c| c.tenant_id == tenant_id)
            .returning(|c| Ok(c.clone()));

        let req = NewClient {
            name: "Acme Corp".to_string(),
            contact_person: None,
            email: None,
            phone: None,
            address: None,
            gst_number: None,
        };
        let created = ClientService::new(Arc::new(repo))
            .create(&tenant_id, &Uuid::new_v4(), req)
            .await
            .unwrap();
        assert_eq!(created.tenant_id, tenant_id);
    }

    #[tokio::test]
    async fn patch_overwrites_only_provided_fields_and_clears_on_null() {
        let tenant_id = Uuid::new_v4();
        let client = stored_client(tenant_id);

        let mut repo = MockClientRepository::new();
        let c = client.clone();
        repo.expect_find_by_id().returning(move |_, _| Ok(Some(c.clone())));
        repo.expect_update()
            .withf(|c| c.name == "Apex Corp" && c.phone.is_none() && c.updated_at.is_some())
            .returning(|c| Ok(c.clone()));

        let patch = ClientPatch {
            name: Patch::Value("Apex Corp".to_string()),
            phone: Patch::Null,
            ..Default::default()
        };
        let updated = ClientService::new(Arc::new(repo))
            .update(&client.id, &tenant_id, &Uuid::new_v4(), patch)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Apex Corp");
        assert_eq!(updated.phone, None);
    }
}
