// ============================================================================
// SiteDesk Infrastructure - PostgreSQL Client Repository
// File: crates/sitedesk-infrastructure/src/database/postgres/client_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use sitedesk_core::domain::Client;
use sitedesk_core::error::DomainError;
use sitedesk_core::repositories::ClientRepository;

pub struct PgClientRepository {
    pool: PgPool,
}

impl PgClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ClientRow {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub gst_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<Uuid>,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Client {
            id: row.id,
            tenant_id: row.tenant_id,
            name: row.name,
            contact_person: row.contact_person,
            email: row.email,
            phone: row.phone,
            address: row.address,
            gst_number: row.gst_number,
            created_at: row.created_at,
            created_by: row.created_by,
            updated_at: row.updated_at,
            updated_by: row.updated_by,
        }
    }
}

const CLIENT_COLUMNS: &str = r#"
    id, tenant_id, name, contact_person, email, phone, address, gst_number,
    created_at, created_by, updated_at, updated_by
"#;

#[async_trait]
impl ClientRepository for PgClientRepository {
    async fn list(&self, tenant_id: &Uuid) -> Result<Vec<Client>, DomainError> {
        let rows: Vec<ClientRow> = sqlx::query_as(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE tenant_id = $1 ORDER BY name"
        ))
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing clients: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn find_by_id(&self, id: &Uuid, tenant_id: &Uuid) -> Result<Option<Client>, DomainError> {
        let row: Option<ClientRow> = sqlx::query_as(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE id = $1 AND tenant_id = $2"
        ))
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding client: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, client: &Client) -> Result<Client, DomainError> {
        let row: ClientRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO clients (
                id, tenant_id, name, contact_person, email, phone, address,
                gst_number, created_at, created_by, updated_at, updated_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {CLIENT_COLUMNS}
            "#
        ))
        .bind(client.id)
        .bind(client.tenant_id)
        .bind(&client.name)
        .bind(&client.contact_person)
        .bind(&client.email)
        .bind(&client.phone)
        .bind(&client.address)
        .bind(&client.gst_number)
        .bind(client.created_at)
        .bind(client.created_by)
        .bind(client.updated_at)
        .bind(client.updated_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating client: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }

    async fn update(&self, client: &Client) -> Result<Client, DomainError> {
        let row: ClientRow = sqlx::query_as(&format!(
            r#"
            UPDATE clients
            SET name = $3, contact_person = $4, email = $5, phone = $6,
                address = $7, gst_number = $8, updated_at = $9, updated_by = $10
            WHERE id = $1 AND tenant_id = $2
            RETURNING {CLIENT_COLUMNS}
            "#
        ))
        .bind(client.id)
        .bind(client.tenant_id)
        .bind(&client.name)
        .bind(&client.contact_person)
        .bind(&client.email)
        .bind(&client.phone)
        .bind(&client.address)
        .bind(&client.gst_number)
        .bind(client.updated_at)
        .bind(client.updated_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error updating client: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }

    async fn delete(&self, id: &Uuid, tenant_id: &Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1 AND tenant_id = $2")
            .bind(id)
            .bind(tenant_id)
            .execute(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error deleting client: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(result.rows_affected() > 0)
    }
}
