// ============================================================================
// SiteDesk Infrastructure - PostgreSQL Inventory Repository
// File: crates/sitedesk-infrastructure/src/database/postgres/inventory_repo_impl.rs
// ============================================================================
//! Stock adjustments are a guarded conditional update plus a ledger insert in
//! one transaction. The `stock_quantity + delta >= 0` predicate runs in the
//! database, so two concurrent issues cannot both pass a stale stock check.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use tracing::{error, warn};
use uuid::Uuid;

use sitedesk_core::domain::{InventoryItem, StockTransaction};
use sitedesk_core::error::DomainError;
use sitedesk_core::repositories::InventoryRepository;

use super::map_db_error;

pub struct PgInventoryRepository {
    pool: PgPool,
}

impl PgInventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ItemRow {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    pub code: String,
    pub unit: Option<String>,
    pub stock_quantity: Decimal,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<Uuid>,
}

impl From<ItemRow> for InventoryItem {
    fn from(row: ItemRow) -> Self {
        InventoryItem {
            id: row.id,
            tenant_id: row.tenant_id,
            name: row.name,
            code: row.code,
            unit: row.unit,
            stock_quantity: row.stock_quantity,
            created_at: row.created_at,
            created_by: row.created_by,
            updated_at: row.updated_at,
            updated_by: row.updated_by,
        }
    }
}

const ITEM_COLUMNS: &str = r#"
    id, tenant_id, name, code, unit, stock_quantity,
    created_at, created_by, updated_at, updated_by
"#;

#[async_trait]
impl InventoryRepository for PgInventoryRepository {
    async fn list(&self, tenant_id: &Uuid) -> Result<Vec<InventoryItem>, DomainError> {
        let rows: Vec<ItemRow> = sqlx::query_as(&format!(
            "SELECT {ITEM_COLUMNS} FROM inventory_items WHERE tenant_id = $1 ORDER BY code"
        ))
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing inventory items: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn find_by_id(
        &self,
        id: &Uuid,
        tenant_id: &Uuid,
    ) -> Result<Option<InventoryItem>, DomainError> {
        let row: Option<ItemRow> = sqlx::query_as(&format!(
            "SELECT {ITEM_COLUMNS} FROM inventory_items WHERE id = $1 AND tenant_id = $2"
        ))
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding inventory item: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, item: &InventoryItem) -> Result<InventoryItem, DomainError> {
        let row: ItemRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO inventory_items (
                id, tenant_id, name, code, unit, stock_quantity,
                created_at, created_by, updated_at, updated_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {ITEM_COLUMNS}
            "#
        ))
        .bind(item.id)
        .bind(item.tenant_id)
        .bind(&item.name)
        .bind(&item.code)
        .bind(&item.unit)
        .bind(item.stock_quantity)
        .bind(item.created_at)
        .bind(item.created_by)
        .bind(item.updated_at)
        .bind(item.updated_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error creating inventory item: {}", e);
            map_db_error(e, "item code")
        })?;

        Ok(row.into())
    }

    async fn apply_transaction(
        &self,
        transaction: &StockTransaction,
        delta: Decimal,
    ) -> Result<StockTransaction, DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::DatabaseError(e.to_string())
        })?;

        let updated: Option<(Decimal,)> = sqlx::query_as(
            r#"
            UPDATE inventory_items
            SET stock_quantity = stock_quantity + $3, updated_at = NOW()
            WHERE id = $1 AND tenant_id = $2 AND stock_quantity + $3 >= 0
            RETURNING stock_quantity
            "#,
        )
        .bind(transaction.item_id)
        .bind(transaction.tenant_id)
        .bind(delta)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error adjusting stock: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        if updated.is_none() {
            // The guarded update matched nothing: either the item does not
            // exist under this tenant, or the issue would take stock
            // negative. Distinguish the two for the caller.
            let stock: Option<(Decimal,)> = sqlx::query_as(
                "SELECT stock_quantity FROM inventory_items WHERE id = $1 AND tenant_id = $2",
            )
            .bind(transaction.item_id)
            .bind(transaction.tenant_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e: sqlx::Error| DomainError::DatabaseError(e.to_string()))?;

            return match stock {
                None => Err(DomainError::NotFound),
                Some((available,)) => {
                    warn!(
                        "Issue of {} refused for item {}: only {} in stock",
                        transaction.quantity, transaction.item_id, available
                    );
                    Err(DomainError::InsufficientStock {
                        requested: transaction.quantity,
                        available,
                    })
                }
            };
        }

        sqlx::query(
            r#"
            INSERT INTO stock_transactions (
                id, tenant_id, item_id, transaction_type, quantity,
                created_at, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(transaction.id)
        .bind(transaction.tenant_id)
        .bind(transaction.item_id)
        .bind(transaction.transaction_type.as_str())
        .bind(transaction.quantity)
        .bind(transaction.created_at)
        .bind(transaction.created_by)
        .execute(&mut *tx)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error appending stock ledger: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        tx.commit().await.map_err(|e| {
            error!("Failed to commit stock transaction: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(transaction.clone())
    }
}
