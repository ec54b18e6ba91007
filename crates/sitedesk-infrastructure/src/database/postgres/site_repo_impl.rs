// ============================================================================
// SiteDesk Infrastructure - PostgreSQL Site Repository
// File: crates/sitedesk-infrastructure/src/database/postgres/site_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use sitedesk_core::domain::Site;
use sitedesk_core::error::DomainError;
use sitedesk_core::repositories::SiteRepository;

pub struct PgSiteRepository {
    pool: PgPool,
}

impl PgSiteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SiteRow {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub client_id: Option<Uuid>,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<Uuid>,
}

impl From<SiteRow> for Site {
    fn from(row: SiteRow) -> Self {
        Site {
            id: row.id,
            tenant_id: row.tenant_id,
            client_id: row.client_id,
            name: row.name,
            address: row.address,
            city: row.city,
            is_active: row.is_active,
            created_at: row.created_at,
            created_by: row.created_by,
            updated_at: row.updated_at,
            updated_by: row.updated_by,
        }
    }
}

const SITE_COLUMNS: &str = r#"
    id, tenant_id, client_id, name, address, city, is_active,
    created_at, created_by, updated_at, updated_by
"#;

#[async_trait]
impl SiteRepository for PgSiteRepository {
    async fn list(&self, tenant_id: &Uuid) -> Result<Vec<Site>, DomainError> {
        let rows: Vec<SiteRow> = sqlx::query_as(&format!(
            "SELECT {SITE_COLUMNS} FROM sites WHERE tenant_id = $1 AND is_active ORDER BY name"
        ))
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing sites: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn find_by_id(&self, id: &Uuid, tenant_id: &Uuid) -> Result<Option<Site>, DomainError> {
        let row: Option<SiteRow> = sqlx::query_as(&format!(
            "SELECT {SITE_COLUMNS} FROM sites WHERE id = $1 AND tenant_id = $2"
        ))
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding site: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, site: &Site) -> Result<Site, DomainError> {
        let row: SiteRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO sites (
                id, tenant_id, client_id, name, address, city, is_active,
                created_at, created_by, updated_at, updated_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {SITE_COLUMNS}
            "#
        ))
        .bind(site.id)
        .bind(site.tenant_id)
        .bind(site.client_id)
        .bind(&site.name)
        .bind(&site.address)
        .bind(&site.city)
        .bind(site.is_active)
        .bind(site.created_at)
        .bind(site.created_by)
        .bind(site.updated_at)
        .bind(site.updated_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating site: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }

    async fn update(&self, site: &Site) -> Result<Site, DomainError> {
        let row: SiteRow = sqlx::query_as(&format!(
            r#"
            UPDATE sites
            SET client_id = $3, name = $4, address = $5, city = $6,
                is_active = $7, updated_at = $8, updated_by = $9
            WHERE id = $1 AND tenant_id = $2
            RETURNING {SITE_COLUMNS}
            "#
        ))
        .bind(site.id)
        .bind(site.tenant_id)
        .bind(site.client_id)
        .bind(&site.name)
        .bind(&site.address)
        .bind(&site.city)
        .bind(site.is_active)
        .bind(site.updated_at)
        .bind(site.updated_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error updating site: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }

    async fn deactivate(&self, id: &Uuid, tenant_id: &Uuid) -> Result<bool, DomainError> {
        // Soft delete; referencing projects and quotations keep the row.
        let result = sqlx::query(
            "UPDATE sites SET is_active = FALSE WHERE id = $1 AND tenant_id = $2 AND is_active",
        )
        .bind(id)
        .bind(tenant_id)
        .execute(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error deactivating site: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(result.rows_affected() > 0)
    }
}
