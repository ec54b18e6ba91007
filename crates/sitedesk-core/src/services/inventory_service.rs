// ============================================================================
// SiteDesk Core - Inventory Service
// File: crates/sitedesk-core/src/services/inventory_service.rs
// ============================================================================
//! Inventory items and stock transactions. An Issue that would take stock
//! negative fails with `InsufficientStock` and leaves both the stock figure
//! and the ledger untouched; the guard lives in the repository's conditional
//! update so concurrent issues cannot both pass a stale check.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::domain::{InventoryItem, StockTransaction, TransactionType};
use crate::error::DomainError;
use crate::repositories::InventoryRepository;

#[derive(Debug, Clone, Deserialize)]
pub struct NewInventoryItem {
    pub name: String,
    pub code: String,
    pub unit: Option<String>,
}

pub struct InventoryService<R: InventoryRepository> {
    repo: Arc<R>,
}

impl<R: InventoryRepository> InventoryService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list_items(&self, tenant_id: &Uuid) -> Result<Vec<InventoryItem>, DomainError> {
        self.repo.list(tenant_id).await
    }

    pub async fn get_item(
        &self,
        id: &Uuid,
        tenant_id: &Uuid,
    ) -> Result<Option<InventoryItem>, DomainError> {
        self.repo.find_by_id(id, tenant_id).await
    }

    pub async fn create_item(
        &self,
        tenant_id: &Uuid,
        user_id: &Uuid,
        req: NewInventoryItem,
    ) -> Result<InventoryItem, DomainError> {
        let item = InventoryItem::new(*tenant_id, req.name, req.code, req.unit, *user_id)?;
        let created = self.repo.create(&item).await?;
        info!("Inventory item created: {} ({})", created.code, created.id);
        Ok(created)
    }

    pub async fn process_transaction(
        &self,
        item_id: &Uuid,
        tenant_id: &Uuid,
        user_id: &Uuid,
        transaction_type: TransactionType,
        quantity: Decimal,
    ) -> Result<StockTransaction, DomainError> {
        if quantity <= Decimal::ZERO {
            return Err(DomainError::ValidationError(
                "Transaction quantity must be positive".to_string(),
            ));
        }

        let transaction =
            StockTransaction::new(*tenant_id, *item_id, transaction_type, quantity, *user_id);
        let applied = self
            .repo
            .apply_transaction(&transaction, transaction_type.delta(quantity))
            .await?;

        info!(
            "Stock {} of {} for item {}",
            transaction_type.as_str(),
            quantity,
            item_id
        );
        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::inventory_repository::MockInventoryRepository;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn issue_sends_negative_delta() {
        let mut repo = MockInventoryRepository::new();
        repo.expect_apply_transaction()
            .withf(|tx, delta| tx.transaction_type == TransactionType::Issue && *delta == dec!(-5))
            .returning(|tx, _| Ok(tx.clone()));

        InventoryService::new(Arc::new(repo))
            .process_transaction(
                &Uuid::new_v4(),
                &Uuid::new_v4(),
                &Uuid::new_v4(),
                TransactionType::Issue,
                dec!(5),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn over_issue_propagates_insufficient_stock() {
        let mut repo = MockInventoryRepository::new();
        repo.expect_apply_transaction().returning(|_, _| {
            Err(DomainError::InsufficientStock {
                requested: dec!(10),
                available: dec!(4),
            })
        });

        let err = InventoryService::new(Arc::new(repo))
            .process_transaction(
                &Uuid::new_v4(),
                &Uuid::new_v4(),
                &Uuid::new_v4(),
                TransactionType::Issue,
                dec!(10),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InsufficientStock { .. }));
    }

    #[tokio::test]
    async fn zero_quantity_is_rejected_before_touching_the_repo() {
        let repo = MockInventoryRepository::new();

        let err = InventoryService::new(Arc::new(repo))
            .process_transaction(
                &Uuid::new_v4(),
                &Uuid::new_v4(),
                &Uuid::new_v4(),
                TransactionType::Receipt,
                Decimal::ZERO,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ValidationError(_)));
    }
}
