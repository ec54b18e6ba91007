//! Inventory repository trait (port)

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{InventoryItem, StockTransaction};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    async fn list(&self, tenant_id: &Uuid) -> Result<Vec<InventoryItem>, DomainError>;
    async fn find_by_id(
        &self,
        id: &Uuid,
        tenant_id: &Uuid,
    ) -> Result<Option<InventoryItem>, DomainError>;
    async fn create(&self, item: &InventoryItem) -> Result<InventoryItem, DomainError>;

    /// Apply `delta` to the item's stock and append the ledger row, in one
    /// transaction. The decrement is guarded in SQL
    /// (`stock_quantity + delta >= 0`); an over-issue fails with
    /// `InsufficientStock` and changes nothing.
    async fn apply_transaction(
        &self,
        transaction: &StockTransaction,
        delta: Decimal,
    ) -> Result<StockTransaction, DomainError>;
}
