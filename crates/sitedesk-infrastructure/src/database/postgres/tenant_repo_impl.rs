// ============================================================================
// SiteDesk Infrastructure - PostgreSQL Tenant Repository
// File: crates/sitedesk-infrastructure/src/database/postgres/tenant_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use sitedesk_core::domain::{SubscriptionPlan, Tenant, User};
use sitedesk_core::error::DomainError;
use sitedesk_core::repositories::TenantRepository;

use super::map_db_error;
use super::user_repo_impl::UserRow;

pub struct PgTenantRepository {
    pool: PgPool,
}

impl PgTenantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct TenantRow {
    pub id: Uuid,
    pub name: String,
    pub subscription_plan: String,
    pub max_users: i32,
    pub max_projects: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub modified_at: Option<DateTime<Utc>>,
    pub removed_at: Option<DateTime<Utc>>,
}

impl From<TenantRow> for Tenant {
    fn from(row: TenantRow) -> Self {
        Tenant {
            id: row.id,
            name: row.name,
            subscription_plan: SubscriptionPlan::from_str(&row.subscription_plan)
                .unwrap_or_default(),
            max_users: row.max_users,
            max_projects: row.max_projects,
            is_active: row.is_active,
            created_at: row.created_at,
            created_by: row.created_by,
            modified_at: row.modified_at,
            removed_at: row.removed_at,
        }
    }
}

const TENANT_COLUMNS: &str = r#"
    id, name, subscription_plan, max_users, max_projects, is_active,
    created_at, created_by, modified_at, removed_at
"#;

#[async_trait]
impl TenantRepository for PgTenantRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Tenant>, DomainError> {
        let row: Option<TenantRow> = sqlx::query_as(&format!(
            "SELECT {TENANT_COLUMNS} FROM tenants WHERE id = $1 AND removed_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding tenant by id: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn list(&self) -> Result<Vec<Tenant>, DomainError> {
        let rows: Vec<TenantRow> = sqlx::query_as(&format!(
            "SELECT {TENANT_COLUMNS} FROM tenants WHERE removed_at IS NULL ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing tenants: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn create_with_admin(
        &self,
        tenant: &Tenant,
        admin: &User,
    ) -> Result<(Tenant, User), DomainError> {
        info!("Creating tenant: {}", tenant.name);

        let mut tx = self.pool.begin().await.map_err(|e| {
            error!("Failed to begin transaction: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        let tenant_row: TenantRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO tenants (
                id, name, subscription_plan, max_users, max_projects, is_active,
                created_at, created_by, modified_at, removed_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {TENANT_COLUMNS}
            "#
        ))
        .bind(tenant.id)
        .bind(&tenant.name)
        .bind(tenant.subscription_plan.as_str())
        .bind(tenant.max_users)
        .bind(tenant.max_projects)
        .bind(tenant.is_active)
        .bind(tenant.created_at)
        .bind(tenant.created_by)
        .bind(tenant.modified_at)
        .bind(tenant.removed_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            error!("Database error creating tenant: {}", e);
            map_db_error(e, "tenant name")
        })?;

        let user_row: UserRow = sqlx::query_as(
            r#"
            INSERT INTO users (
                id, tenant_id, username, email, full_name, password_hash,
                role, is_active, last_login_at, created_at, modified_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING
                id, tenant_id, username, email, full_name, password_hash,
                role, is_active, last_login_at, created_at, modified_at
            "#,
        )
        .bind(admin.id)
        .bind(admin.tenant_id)
        .bind(&admin.username)
        .bind(&admin.email)
        .bind(&admin.full_name)
        .bind(&admin.password_hash)
        .bind(admin.role.as_str())
        .bind(admin.is_active)
        .bind(admin.last_login_at)
        .bind(admin.created_at)
        .bind(admin.modified_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            error!("Database error creating admin user: {}", e);
            map_db_error(e, "email")
        })?;

        tx.commit().await.map_err(|e| {
            error!("Failed to commit tenant registration: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        info!("Tenant created successfully: {}", tenant_row.id);
        Ok((tenant_row.into(), user_row.into()))
    }

    async fn deactivate(&self, id: &Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE tenants
            SET is_active = FALSE, removed_at = NOW()
            WHERE id = $1 AND removed_at IS NULL
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error deactivating tenant: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(result.rows_affected() > 0)
    }
}
