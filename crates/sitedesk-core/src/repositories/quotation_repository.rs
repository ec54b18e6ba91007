//! Quotation repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Quotation, QuotationItem, QuotationTotals};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuotationRepository: Send + Sync {
    async fn list(&self, tenant_id: &Uuid) -> Result<Vec<Quotation>, DomainError>;
    async fn find_by_id(
        &self,
        id: &Uuid,
        tenant_id: &Uuid,
    ) -> Result<Option<Quotation>, DomainError>;
    /// Items of a quotation already fetched under the caller's tenant.
    async fn list_items(&self, quotation_id: &Uuid) -> Result<Vec<QuotationItem>, DomainError>;
    /// Item lookup joined through its quotation so the tenant predicate
    /// applies; an item under another tenant's quotation is `None`.
    async fn find_item(
        &self,
        item_id: &Uuid,
        tenant_id: &Uuid,
    ) -> Result<Option<QuotationItem>, DomainError>;

    /// Insert quotation and items in one transaction, allocating
    /// `quotation_number` from the per-tenant counter inside that same
    /// transaction. Returns the quotation with its allocated number.
    async fn create_with_items(
        &self,
        quotation: &Quotation,
        items: &[QuotationItem],
    ) -> Result<Quotation, DomainError>;

    /// Persist header changes (status, percentages, totals).
    async fn update(&self, quotation: &Quotation) -> Result<Quotation, DomainError>;
    async fn delete(&self, id: &Uuid, tenant_id: &Uuid) -> Result<bool, DomainError>;

    /// Item mutation and parent totals persist in one transaction.
    async fn insert_item(
        &self,
        item: &QuotationItem,
        totals: &QuotationTotals,
    ) -> Result<QuotationItem, DomainError>;
    async fn update_item(
        &self,
        item: &QuotationItem,
        totals: &QuotationTotals,
    ) -> Result<QuotationItem, DomainError>;
    async fn delete_item(
        &self,
        item_id: &Uuid,
        quotation_id: &Uuid,
        totals: &QuotationTotals,
    ) -> Result<bool, DomainError>;

    /// Advisory preview of the next sequence value. Not transactional; a
    /// concurrent create may take the previewed number.
    async fn peek_next_sequence(&self, tenant_id: &Uuid, year: i32) -> Result<i64, DomainError>;
}
