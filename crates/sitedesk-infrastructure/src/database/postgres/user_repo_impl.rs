// ============================================================================
// SiteDesk Infrastructure - PostgreSQL User Repository
// File: crates/sitedesk-infrastructure/src/database/postgres/user_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use sitedesk_core::domain::{User, UserRole};
use sitedesk_core::error::DomainError;
use sitedesk_core::repositories::UserRepository;

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping; shared with the tenant repository's
// registration transaction.
#[derive(Debug, FromRow)]
pub(super) struct UserRow {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            tenant_id: row.tenant_id,
            username: row.username,
            email: row.email,
            full_name: row.full_name,
            password_hash: row.password_hash,
            role: UserRole::from_str(&row.role).unwrap_or(UserRole::Worker),
            is_active: row.is_active,
            last_login_at: row.last_login_at,
            created_at: row.created_at,
            modified_at: row.modified_at,
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT
                id, tenant_id, username, email, full_name, password_hash,
                role, is_active, last_login_at, created_at, modified_at
            FROM users
            WHERE LOWER(username) = LOWER($1)
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding user by username: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        let exists: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM users WHERE LOWER(email) = LOWER($1)")
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e: sqlx::Error| {
                    error!("Database error checking email: {}", e);
                    DomainError::DatabaseError(e.to_string())
                })?;

        Ok(exists.is_some())
    }

    async fn record_login(&self, id: &Uuid, at: DateTime<Utc>) -> Result<(), DomainError> {
        sqlx::query("UPDATE users SET last_login_at = $2 WHERE id = $1")
            .bind(id)
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error recording login: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(())
    }
}
