// ============================================================================
// SiteDesk Infrastructure - PostgreSQL Quotation Repository
// File: crates/sitedesk-infrastructure/src/database/postgres/quotation_repo_impl.rs
// ============================================================================
//! Quotation persistence. Two invariants live here:
//!
//! 1. `quotation_number` comes from a per-tenant, per-year counter row
//!    bumped with an atomic upsert inside the same transaction as the
//!    quotation insert, so concurrent creates can never share a number.
//! 2. Every item mutation persists the parent's recomputed totals in the
//!    same transaction as the item change.

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use tracing::{error, info};
use uuid::Uuid;

use sitedesk_core::domain::{Quotation, QuotationItem, QuotationStatus, QuotationTotals};
use sitedesk_core::error::DomainError;
use sitedesk_core::repositories::QuotationRepository;

use super::map_db_error;

pub struct PgQuotationRepository {
    pool: PgPool,
}

impl PgQuotationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Bump and return the per-tenant sequence for `year`. Must run inside
    /// the caller's transaction so the allocated number commits (or rolls
    /// back) together with the quotation row.
    async fn allocate_sequence(
        tx: &mut Transaction<'_, Postgres>,
        tenant_id: &Uuid,
        year: i32,
    ) -> Result<i64, DomainError> {
        let (value,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO quotation_counters (tenant_id, year, value)
            VALUES ($1, $2, 1)
            ON CONFLICT (tenant_id, year)
            DO UPDATE SET value = quotation_counters.value + 1
            RETURNING value
            "#,
        )
        .bind(tenant_id)
        .bind(year)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error allocating quotation sequence: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(value)
    }

    async fn persist_totals(
        tx: &mut Transaction<'_, Postgres>,
        quotation_id: &Uuid,
        totals: &QuotationTotals,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            UPDATE quotations
            SET sub_total = $2, tax_amount = $3, discount_amount = $4,
                grand_total = $5, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(quotation_id)
        .bind(totals.sub_total)
        .bind(totals.tax_amount)
        .bind(totals.discount_amount)
        .bind(totals.grand_total)
        .execute(&mut **tx)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error persisting quotation totals: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(())
    }

    async fn insert_item_row(
        tx: &mut Transaction<'_, Postgres>,
        item: &QuotationItem,
    ) -> Result<ItemRow, DomainError> {
        sqlx::query_as(&format!(
            r#"
            INSERT INTO quotation_items (
                id, quotation_id, description, quantity, width, length, height,
                area, unit, rate, amount, is_with_material, sequence
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {ITEM_COLUMNS}
            "#
        ))
        .bind(item.id)
        .bind(item.quotation_id)
        .bind(&item.description)
        .bind(item.quantity)
        .bind(item.width)
        .bind(item.length)
        .bind(item.height)
        .bind(item.area)
        .bind(&item.unit)
        .bind(item.rate)
        .bind(item.amount)
        .bind(item.is_with_material)
        .bind(item.sequence)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error inserting quotation item: {}", e);
            DomainError::DatabaseError(e.to_string())
        })
    }
}

#[derive(Debug, FromRow)]
struct QuotationRow {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub project_id: Uuid,
    pub site_id: Option<Uuid>,
    pub quotation_number: String,
    pub status: String,
    pub tax_pct: Decimal,
    pub discount_pct: Decimal,
    pub sub_total: Decimal,
    pub tax_amount: Decimal,
    pub discount_amount: Decimal,
    pub grand_total: Decimal,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<Uuid>,
}

impl From<QuotationRow> for Quotation {
    fn from(row: QuotationRow) -> Self {
        Quotation {
            id: row.id,
            tenant_id: row.tenant_id,
            project_id: row.project_id,
            site_id: row.site_id,
            quotation_number: row.quotation_number,
            status: QuotationStatus::from_str(&row.status).unwrap_or_default(),
            tax_pct: row.tax_pct,
            discount_pct: row.discount_pct,
            sub_total: row.sub_total,
            tax_amount: row.tax_amount,
            discount_amount: row.discount_amount,
            grand_total: row.grand_total,
            created_at: row.created_at,
            created_by: row.created_by,
            updated_at: row.updated_at,
            updated_by: row.updated_by,
        }
    }
}

#[derive(Debug, FromRow)]
struct ItemRow {
    pub id: Uuid,
    pub quotation_id: Uuid,
    pub description: String,
    pub quantity: Decimal,
    pub width: Option<Decimal>,
    pub length: Option<Decimal>,
    pub height: Option<Decimal>,
    pub area: Option<Decimal>,
    pub unit: Option<String>,
    pub rate: Decimal,
    pub amount: Decimal,
    pub is_with_material: bool,
    pub sequence: i32,
}

impl From<ItemRow> for QuotationItem {
    fn from(row: ItemRow) -> Self {
        QuotationItem {
            id: row.id,
            quotation_id: row.quotation_id,
            description: row.description,
            quantity: row.quantity,
            width: row.width,
            length: row.length,
            height: row.height,
            area: row.area,
            unit: row.unit,
            rate: row.rate,
            amount: row.amount,
            is_with_material: row.is_with_material,
            sequence: row.sequence,
        }
    }
}

const QUOTATION_COLUMNS: &str = r#"
    id, tenant_id, project_id, site_id, quotation_number, status,
    tax_pct, discount_pct, sub_total, tax_amount, discount_amount, grand_total,
    created_at, created_by, updated_at, updated_by
"#;

const ITEM_COLUMNS: &str = r#"
    id, quotation_id, description, quantity, width, length, height,
    area, unit, rate, amount, is_with_material, sequence
"#;

#[async_trait]
impl QuotationRepository for PgQuotationRepository {
    async fn list(&self, tenant_id: &Uuid) -> Result<Vec<Quotation>, DomainError> {
        let rows: Vec<QuotationRow> = sqlx::query_as(&format!(
            "SELECT {QUOTATION_COLUMNS} FROM quotations WHERE tenant_id = $1 ORDER BY created_at DESC"
        ))
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing quotations: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn find_by_id(
        &self,
        id: &Uuid,
        tenant_id: &Uuid,
    ) -> Result<Option<Quotation>, DomainError> {
        let row: Option<QuotationRow> = sqlx::query_as(&format!(
            "SELECT {QUOTATION_COLUMNS} FROM quotations WHERE id = $1 AND tenant_id = $2"
        ))
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding quotation: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn list_items(&self, quotation_id: &Uuid) -> Result<Vec<QuotationItem>, DomainError> {
        let rows: Vec<ItemRow> = sqlx::query_as(&format!(
            "SELECT {ITEM_COLUMNS} FROM quotation_items WHERE quotation_id = $1 ORDER BY sequence"
        ))
        .bind(quotation_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing quotation items: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn find_item(
        &self,
        item_id: &Uuid,
        tenant_id: &Uuid,
    ) -> Result<Option<QuotationItem>, DomainError> {
        // Joined through the parent so the tenant predicate applies; an item
        // under another tenant's quotation is indistinguishable from a
        // missing one.
        let row: Option<ItemRow> = sqlx::query_as(
            r#"
            SELECT
                i.id, i.quotation_id, i.description, i.quantity, i.width,
                i.length, i.height, i.area, i.unit, i.rate, i.amount,
                i.is_with_material, i.sequence
            FROM quotation_items i
            JOIN quotations q ON q.id = i.quotation_id
            WHERE i.id = $1 AND q.tenant_id = $2
            "#,
        )
        .bind(item_id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding quotation item: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn create_with_items(
        &self,
        quotation: &Quotation,
        items: &[QuotationItem],
    ) -> Result<Quotation, DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            error!("Failed to begin transaction: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        let year = quotation.created_at.year();
        let sequence = Self::allocate_sequence(&mut tx, &quotation.tenant_id, year).await?;
        let number = Quotation::format_number(year, sequence);

        let row: QuotationRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO quotations (
                id, tenant_id, project_id, site_id, quotation_number, status,
                tax_pct, discount_pct, sub_total, tax_amount, discount_amount,
                grand_total, created_at, created_by, updated_at, updated_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING {QUOTATION_COLUMNS}
            "#
        ))
        .bind(quotation.id)
        .bind(quotation.tenant_id)
        .bind(quotation.project_id)
        .bind(quotation.site_id)
        .bind(&number)
        .bind(quotation.status.as_str())
        .bind(quotation.tax_pct)
        .bind(quotation.discount_pct)
        .bind(quotation.sub_total)
        .bind(quotation.tax_amount)
        .bind(quotation.discount_amount)
        .bind(quotation.grand_total)
        .bind(quotation.created_at)
        .bind(quotation.created_by)
        .bind(quotation.updated_at)
        .bind(quotation.updated_by)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            error!("Database error creating quotation: {}", e);
            map_db_error(e, "quotation_number")
        })?;

        for item in items {
            Self::insert_item_row(&mut tx, item).await?;
        }

        tx.commit().await.map_err(|e| {
            error!("Failed to commit quotation create: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        info!("Quotation persisted: {}", row.quotation_number);
        Ok(row.into())
    }

    async fn update(&self, quotation: &Quotation) -> Result<Quotation, DomainError> {
        let row: QuotationRow = sqlx::query_as(&format!(
            r#"
            UPDATE quotations
            SET site_id = $3, status = $4, tax_pct = $5, discount_pct = $6,
                sub_total = $7, tax_amount = $8, discount_amount = $9,
                grand_total = $10, updated_at = $11, updated_by = $12
            WHERE id = $1 AND tenant_id = $2
            RETURNING {QUOTATION_COLUMNS}
            "#
        ))
        .bind(quotation.id)
        .bind(quotation.tenant_id)
        .bind(quotation.site_id)
        .bind(quotation.status.as_str())
        .bind(quotation.tax_pct)
        .bind(quotation.discount_pct)
        .bind(quotation.sub_total)
        .bind(quotation.tax_amount)
        .bind(quotation.discount_amount)
        .bind(quotation.grand_total)
        .bind(quotation.updated_at)
        .bind(quotation.updated_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error updating quotation: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }

    async fn delete(&self, id: &Uuid, tenant_id: &Uuid) -> Result<bool, DomainError> {
        // Items cascade via FK.
        let result = sqlx::query("DELETE FROM quotations WHERE id = $1 AND tenant_id = $2")
            .bind(id)
            .bind(tenant_id)
            .execute(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error deleting quotation: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_item(
        &self,
        item: &QuotationItem,
        totals: &QuotationTotals,
    ) -> Result<QuotationItem, DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::DatabaseError(e.to_string())
        })?;

        let row = Self::insert_item_row(&mut tx, item).await?;
        Self::persist_totals(&mut tx, &item.quotation_id, totals).await?;

        tx.commit().await.map_err(|e| {
            error!("Failed to commit item insert: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }

    async fn update_item(
        &self,
        item: &QuotationItem,
        totals: &QuotationTotals,
    ) -> Result<QuotationItem, DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::DatabaseError(e.to_string())
        })?;

        let row: ItemRow = sqlx::query_as(&format!(
            r#"
            UPDATE quotation_items
            SET description = $2, quantity = $3, width = $4, length = $5,
                height = $6, area = $7, unit = $8, rate = $9, amount = $10,
                is_with_material = $11, sequence = $12
            WHERE id = $1
            RETURNING {ITEM_COLUMNS}
            "#
        ))
        .bind(item.id)
        .bind(&item.description)
        .bind(item.quantity)
        .bind(item.width)
        .bind(item.length)
        .bind(item.height)
        .bind(item.area)
        .bind(&item.unit)
        .bind(item.rate)
        .bind(item.amount)
        .bind(item.is_with_material)
        .bind(item.sequence)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error updating quotation item: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Self::persist_totals(&mut tx, &item.quotation_id, totals).await?;

        tx.commit().await.map_err(|e| {
            error!("Failed to commit item update: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }

    async fn delete_item(
        &self,
        item_id: &Uuid,
        quotation_id: &Uuid,
        totals: &QuotationTotals,
    ) -> Result<bool, DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::DatabaseError(e.to_string())
        })?;

        let result = sqlx::query(
            "DELETE FROM quotation_items WHERE id = $1 AND quotation_id = $2",
        )
        .bind(item_id)
        .bind(quotation_id)
        .execute(&mut *tx)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error deleting quotation item: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        Self::persist_totals(&mut tx, quotation_id, totals).await?;

        tx.commit().await.map_err(|e| {
            error!("Failed to commit item delete: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(true)
    }

    async fn peek_next_sequence(&self, tenant_id: &Uuid, year: i32) -> Result<i64, DomainError> {
        let value: Option<(i64,)> = sqlx::query_as(
            "SELECT value FROM quotation_counters WHERE tenant_id = $1 AND year = $2",
        )
        .bind(tenant_id)
        .bind(year)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error reading quotation counter: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(value.map(|(v,)| v).unwrap_or(0) + 1)
    }
}
