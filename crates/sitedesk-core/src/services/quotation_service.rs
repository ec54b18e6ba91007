// ============================================================================
// SiteDesk Core - Quotation Service
// File: crates/sitedesk-core/src/services/quotation_service.rs
// ============================================================================
//! Quotation CRUD and the totals roll-up engine.
//!
//! Every mutation of a quotation's item set or percentages recomputes the
//! four derived totals from the full current item set and persists them in
//! the same transaction as the mutation (the repository owns the
//! transaction; this service owns the arithmetic).

use std::sync::Arc;

use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use sitedesk_shared::Patch;

use crate::domain::{
    AmountMode, Quotation, QuotationItem, QuotationStatus, QuotationTotals,
};
use crate::error::DomainError;
use crate::repositories::QuotationRepository;

#[derive(Debug, Clone, Deserialize)]
pub struct NewQuotationItem {
    pub description: String,
    pub quantity: Decimal,
    pub width: Option<Decimal>,
    pub length: Option<Decimal>,
    pub height: Option<Decimal>,
    pub area: Option<Decimal>,
    pub unit: Option<String>,
    pub rate: Decimal,
    /// Stored as-is in caller-supplied mode; ignored in derive mode.
    pub amount: Decimal,
    #[serde(default)]
    pub is_with_material: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewQuotation {
    pub project_id: Uuid,
    pub site_id: Option<Uuid>,
    pub tax_pct: Decimal,
    pub discount_pct: Decimal,
    #[serde(default)]
    pub items: Vec<NewQuotationItem>,
}

/// Header patch. Absent fields leave the stored value alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuotationHeaderPatch {
    #[serde(default)]
    pub site_id: Patch<Uuid>,
    #[serde(default)]
    pub status: Patch<QuotationStatus>,
    #[serde(default)]
    pub tax_pct: Patch<Decimal>,
    #[serde(default)]
    pub discount_pct: Patch<Decimal>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuotationItemPatch {
    #[serde(default)]
    pub description: Patch<String>,
    #[serde(default)]
    pub quantity: Patch<Decimal>,
    #[serde(default)]
    pub width: Patch<Decimal>,
    #[serde(default)]
    pub length: Patch<Decimal>,
    #[serde(default)]
    pub height: Patch<Decimal>,
    #[serde(default)]
    pub area: Patch<Decimal>,
    #[serde(default)]
    pub unit: Patch<String>,
    #[serde(default)]
    pub rate: Patch<Decimal>,
    #[serde(default)]
    pub amount: Patch<Decimal>,
    #[serde(default)]
    pub is_with_material: Patch<bool>,
    #[serde(default)]
    pub sequence: Patch<i32>,
}

#[derive(Debug, Clone)]
pub struct QuotationWithItems {
    pub quotation: Quotation,
    pub items: Vec<QuotationItem>,
}

pub struct QuotationService<R: QuotationRepository> {
    repo: Arc<R>,
    amount_mode: AmountMode,
}

impl<R: QuotationRepository> QuotationService<R> {
    pub fn new(repo: Arc<R>, amount_mode: AmountMode) -> Self {
        Self { repo, amount_mode }
    }

    pub async fn list(&self, tenant_id: &Uuid) -> Result<Vec<Quotation>, DomainError> {
        self.repo.list(tenant_id).await
    }

    pub async fn get(
        &self,
        id: &Uuid,
        tenant_id: &Uuid,
    ) -> Result<Option<QuotationWithItems>, DomainError> {
        let Some(quotation) = self.repo.find_by_id(id, tenant_id).await? else {
            return Ok(None);
        };
        let items = self.repo.list_items(&quotation.id).await?;
        Ok(Some(QuotationWithItems { quotation, items }))
    }

    pub async fn create(
        &self,
        tenant_id: &Uuid,
        user_id: &Uuid,
        req: NewQuotation,
    ) -> Result<QuotationWithItems, DomainError> {
        let mut quotation = Quotation::new(
            *tenant_id,
            req.project_id,
            req.site_id,
            req.tax_pct,
            req.discount_pct,
            *user_id,
        );

        let items: Vec<QuotationItem> = req
            .items
            .into_iter()
            .enumerate()
            .map(|(i, item)| self.build_item(&quotation, item, (i + 1) as i32))
            .collect();

        let totals = QuotationTotals::compute(
            items.iter().map(|i| i.amount),
            quotation.tax_pct,
            quotation.discount_pct,
        );
        quotation.apply_totals(totals);

        let created = self.repo.create_with_items(&quotation, &items).await?;
        info!(
            "Quotation created: {} ({} items)",
            created.quotation_number,
            items.len()
        );
        Ok(QuotationWithItems { quotation: created, items })
    }

    /// Header patch. Changing either percentage recomputes the totals from
    /// the current persisted item set, not from the pre-change values.
    pub async fn update(
        &self,
        id: &Uuid,
        tenant_id: &Uuid,
        user_id: &Uuid,
        patch: QuotationHeaderPatch,
    ) -> Result<Option<Quotation>, DomainError> {
        let Some(mut quotation) = self.repo.find_by_id(id, tenant_id).await? else {
            return Ok(None);
        };

        let pct_changed = !patch.tax_pct.is_missing() || !patch.discount_pct.is_missing();
        patch.site_id.apply_to(&mut quotation.site_id);
        patch.status.overwrite(&mut quotation.status);
        patch.tax_pct.overwrite(&mut quotation.tax_pct);
        patch.discount_pct.overwrite(&mut quotation.discount_pct);

        if pct_changed {
            let items = self.repo.list_items(&quotation.id).await?;
            let totals = QuotationTotals::compute(
                items.iter().map(|i| i.amount),
                quotation.tax_pct,
                quotation.discount_pct,
            );
            quotation.apply_totals(totals);
        }

        quotation.touch(*user_id);
        Ok(Some(self.repo.update(&quotation).await?))
    }

    pub async fn delete(&self, id: &Uuid, tenant_id: &Uuid) -> Result<bool, DomainError> {
        self.repo.delete(id, tenant_id).await
    }

    pub async fn add_item(
        &self,
        quotation_id: &Uuid,
        tenant_id: &Uuid,
        req: NewQuotationItem,
    ) -> Result<Option<QuotationItem>, DomainError> {
        let Some(quotation) = self.repo.find_by_id(quotation_id, tenant_id).await? else {
            return Ok(None);
        };

        let existing = self.repo.list_items(&quotation.id).await?;
        let sequence = existing.iter().map(|i| i.sequence).max().unwrap_or(0) + 1;
        let item = self.build_item(&quotation, req, sequence);

        let totals = QuotationTotals::compute(
            existing.iter().map(|i| i.amount).chain([item.amount]),
            quotation.tax_pct,
            quotation.discount_pct,
        );

        Ok(Some(self.repo.insert_item(&item, &totals).await?))
    }

    pub async fn update_item(
        &self,
        item_id: &Uuid,
        tenant_id: &Uuid,
        patch: QuotationItemPatch,
    ) -> Result<Option<QuotationItem>, DomainError> {
        let Some(mut item) = self.repo.find_item(item_id, tenant_id).await? else {
            return Ok(None);
        };

        patch.description.overwrite(&mut item.description);
        patch.quantity.overwrite(&mut item.quantity);
        patch.width.apply_to(&mut item.width);
        patch.length.apply_to(&mut item.length);
        patch.height.apply_to(&mut item.height);
        patch.area.apply_to(&mut item.area);
        patch.unit.apply_to(&mut item.unit);
        patch.rate.overwrite(&mut item.rate);
        patch.is_with_material.overwrite(&mut item.is_with_material);
        patch.sequence.overwrite(&mut item.sequence);
        match self.amount_mode {
            AmountMode::CallerSupplied => patch.amount.overwrite(&mut item.amount),
            AmountMode::DeriveFromRate => {
                item.amount =
                    QuotationItem::resolve_amount(self.amount_mode, item.amount, item.quantity, item.rate)
            }
        }

        // Totals come from the full current item set with the patched item
        // substituted in.
        let quotation = self
            .repo
            .find_by_id(&item.quotation_id, tenant_id)
            .await?
            .ok_or(DomainError::NotFound)?;
        let items = self.repo.list_items(&quotation.id).await?;
        let totals = QuotationTotals::compute(
            items
                .iter()
                .map(|i| if i.id == item.id { item.amount } else { i.amount }),
            quotation.tax_pct,
            quotation.discount_pct,
        );

        Ok(Some(self.repo.update_item(&item, &totals).await?))
    }

    pub async fn remove_item(&self, item_id: &Uuid, tenant_id: &Uuid) -> Result<bool, DomainError> {
        let Some(item) = self.repo.find_item(item_id, tenant_id).await? else {
            return Ok(false);
        };

        let quotation = self
            .repo
            .find_by_id(&item.quotation_id, tenant_id)
            .await?
            .ok_or(DomainError::NotFound)?;

        // Exclude the removed item by id rather than trusting any in-memory
        // collection to already reflect the deletion.
        let items = self.repo.list_items(&quotation.id).await?;
        let totals = QuotationTotals::compute(
            items.iter().filter(|i| i.id != *item_id).map(|i| i.amount),
            quotation.tax_pct,
            quotation.discount_pct,
        );

        self.repo.delete_item(item_id, &quotation.id, &totals).await
    }

    /// Advisory preview of the next quotation number; a concurrent create
    /// may take it first.
    pub async fn next_number(&self, tenant_id: &Uuid) -> Result<String, DomainError> {
        let year = Utc::now().year();
        let seq = self.repo.peek_next_sequence(tenant_id, year).await?;
        Ok(Quotation::format_number(year, seq))
    }

    fn build_item(&self, quotation: &Quotation, req: NewQuotationItem, sequence: i32) -> QuotationItem {
        QuotationItem {
            id: Uuid::new_v4(),
            quotation_id: quotation.id,
            description: req.description,
            quantity: req.quantity,
            width: req.width,
            length: req.length,
            height: req.height,
            area: req.area,
            unit: req.unit,
            rate: req.rate,
            amount: QuotationItem::resolve_amount(self.amount_mode, req.amount, req.quantity, req.rate),
            is_with_material: req.is_with_material,
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::quotation_repository::MockQuotationRepository;
    use rust_decimal_macros::dec;

    fn new_item(amount: Decimal) -> NewQuotationItem {
        NewQuotationItem {
            description: "Brickwork".to_string(),
            quantity: dec!(1),
            width: None,
            length: None,
            height: None,
            area: None,
            unit: Some("sqft".to_string()),
            rate: dec!(0),
            amount,
            is_with_material: false,
        }
    }

    fn stored_item(quotation_id: Uuid, amount: Decimal) -> QuotationItem {
        QuotationItem {
            id: Uuid::new_v4(),
            quotation_id,
            description: "Brickwork".to_string(),
            quantity: dec!(1),
            width: None,
            length: None,
            height: None,
            area: None,
            unit: None,
            rate: dec!(0),
            amount,
            is_with_material: false,
            sequence: 1,
        }
    }

    fn draft_quotation(tenant_id: Uuid, tax_pct: Decimal, discount_pct: Decimal) -> Quotation {
        Quotation::new(tenant_id, Uuid::new_v4(), None, tax_pct, discount_pct, Uuid::new_v4())
    }

    fn service(repo: MockQuotationRepository) -> QuotationService<MockQuotationRepository> {
        QuotationService::new(Arc::new(repo), AmountMode::CallerSupplied)
    }

    #[tokio::test]
    async fn create_rolls_up_totals_before_persisting() {
        let tenant_id = Uuid::new_v4();

        let mut repo = MockQuotationRepository::new();
        repo.expect_create_with_items()
            .withf(|q, items| {
                items.len() == 2
                    && q.sub_total == dec!(150)
                    && q.tax_amount == dec!(27.00)
                    && q.discount_amount == dec!(15.00)
                    && q.grand_total == dec!(162.00)
            })
            .returning(|q, _| Ok(q.clone()));

        let req = NewQuotation {
            project_id: Uuid::new_v4(),
            site_id: None,
            tax_pct: dec!(18),
            discount_pct: dec!(10),
            items: vec![new_item(dec!(100)), new_item(dec!(50))],
        };

        let created = service(repo)
            .create(&tenant_id, &Uuid::new_v4(), req)
            .await
            .unwrap();
        assert_eq!(created.quotation.grand_total, dec!(162.00));
        assert_eq!(created.items[0].sequence, 1);
        assert_eq!(created.items[1].sequence, 2);
    }

    #[tokio::test]
    async fn add_item_recomputes_totals_over_full_item_set() {
        let tenant_id = Uuid::new_v4();
        let quotation = draft_quotation(tenant_id, dec!(18), dec!(10));
        let quotation_id = quotation.id;
        let existing = stored_item(quotation_id, dec!(100));

        let mut repo = MockQuotationRepository::new();
        let q = quotation.clone();
        repo.expect_find_by_id().returning(move |_, _| Ok(Some(q.clone())));
        let e = existing.clone();
        repo.expect_list_items().returning(move |_| Ok(vec![e.clone()]));
        repo.expect_insert_item()
            .withf(|item, totals| {
                item.amount == dec!(50)
                    && item.sequence == 2
                    && totals.sub_total == dec!(150)
                    && totals.grand_total == dec!(162.00)
            })
            .returning(|item, _| Ok(item.clone()));

        let added = service(repo)
            .add_item(&quotation_id, &tenant_id, new_item(dec!(50)))
            .await
            .unwrap();
        assert!(added.is_some());
    }

    #[tokio::test]
    async fn remove_item_excludes_the_removed_id_from_the_roll_up() {
        let tenant_id = Uuid::new_v4();
        let quotation = draft_quotation(tenant_id, dec!(18), dec!(10));
        let kept = stored_item(quotation.id, dec!(100));
        let removed = stored_item(quotation.id, dec!(50));
        let removed_id = removed.id;

        let mut repo = MockQuotationRepository::new();
        let r = removed.clone();
        repo.expect_find_item().returning(move |_, _| Ok(Some(r.clone())));
        let q = quotation.clone();
        repo.expect_find_by_id().returning(move |_, _| Ok(Some(q.clone())));
        // The stored item set still contains the row being removed.
        let all = vec![kept.clone(), removed.clone()];
        repo.expect_list_items().returning(move |_| Ok(all.clone()));
        repo.expect_delete_item()
            .withf(|_, _, totals| {
                totals.sub_total == dec!(100)
                    && totals.tax_amount == dec!(18.00)
                    && totals.discount_amount == dec!(10.00)
                    && totals.grand_total == dec!(108.00)
            })
            .returning(|_, _, _| Ok(true));

        assert!(service(repo).remove_item(&removed_id, &tenant_id).await.unwrap());
    }

    #[tokio::test]
    async fn update_item_substitutes_the_patched_amount() {
        let tenant_id = Uuid::new_v4();
        let quotation = draft_quotation(tenant_id, dec!(0), dec!(0));
        let item = stored_item(quotation.id, dec!(100));
        let other = stored_item(quotation.id, dec!(40));

        let mut repo = MockQuotationRepository::new();
        let i = item.clone();
        repo.expect_find_item().returning(move |_, _| Ok(Some(i.clone())));
        let q = quotation.clone();
        repo.expect_find_by_id().returning(move |_, _| Ok(Some(q.clone())));
        let all = vec![item.clone(), other.clone()];
        repo.expect_list_items().returning(move |_| Ok(all.clone()));
        repo.expect_update_item()
            .withf(|item, totals| item.amount == dec!(60) && totals.sub_total == dec!(100))
            .returning(|item, _| Ok(item.clone()));

        let patch = QuotationItemPatch {
            amount: Patch::Value(dec!(60)),
            ..Default::default()
        };
        let updated = service(repo)
            .update_item(&item.id, &tenant_id, patch)
            .await
            .unwrap();
        assert_eq!(updated.unwrap().amount, dec!(60));
    }

    #[tokio::test]
    async fn changing_tax_pct_recomputes_from_current_items() {
        let tenant_id = Uuid::new_v4();
        let mut quotation = draft_quotation(tenant_id, dec!(18), dec!(10));
        quotation.apply_totals(QuotationTotals::compute([dec!(100)], dec!(18), dec!(10)));
        let item = stored_item(quotation.id, dec!(100));

        let mut repo = MockQuotationRepository::new();
        let q = quotation.clone();
        repo.expect_find_by_id().returning(move |_, _| Ok(Some(q.clone())));
        repo.expect_list_items().returning(move |_| Ok(vec![item.clone()]));
        repo.expect_update()
            .withf(|q| {
                q.tax_pct == dec!(12)
                    && q.tax_amount == dec!(12.00)
                    && q.grand_total == dec!(102.00)
            })
            .returning(|q| Ok(q.clone()));

        let patch = QuotationHeaderPatch {
            tax_pct: Patch::Value(dec!(12)),
            ..Default::default()
        };
        let updated = service(repo)
            .update(&quotation.id, &tenant_id, &Uuid::new_v4(), patch)
            .await
            .unwrap();
        assert!(updated.is_some());
    }

    #[tokio::test]
    async fn next_number_formats_the_peeked_sequence() {
        let mut repo = MockQuotationRepository::new();
        repo.expect_peek_next_sequence()
            .withf(|_, year| *year == Utc::now().year())
            .returning(|_, _| Ok(7));

        let number = service(repo).next_number(&Uuid::new_v4()).await.unwrap();
        assert_eq!(number, Quotation::format_number(Utc::now().year(), 7));
        assert!(number.ends_with("-0007"));
    }

    #[tokio::test]
    async fn wrong_tenant_behaves_as_not_found() {
        let mut repo = MockQuotationRepository::new();
        repo.expect_find_by_id().returning(|_, _| Ok(None));
        repo.expect_find_item().returning(|_, _| Ok(None));
        repo.expect_delete().returning(|_, _| Ok(false));

        let svc = service(repo);
        let tenant_b = Uuid::new_v4();
        let id = Uuid::new_v4();

        assert!(svc.get(&id, &tenant_b).await.unwrap().is_none());
        assert!(!svc.remove_item(&id, &tenant_b).await.unwrap());
        assert!(!svc.delete(&id, &tenant_b).await.unwrap());
    }

    #[tokio::test]
    async fn derive_mode_computes_amount_from_quantity_and_rate() {
        let tenant_id = Uuid::new_v4();

        let mut repo = MockQuotationRepository::new();
        repo.expect_create_with_items()
            .withf(|q, items| items[0].amount == dec!(250.00) && q.sub_total == dec!(250.00))
            .returning(|q, _| Ok(q.clone()));

        let svc = QuotationService::new(Arc::new(repo), AmountMode::DeriveFromRate);
        let mut item = new_item(dec!(999));
        item.quantity = dec!(5);
        item.rate = dec!(50);
        let req = NewQuotation {
            project_id: Uuid::new_v4(),
            site_id: None,
            tax_pct: dec!(0),
            discount_pct: dec!(0),
            items: vec![item],
        };
        svc.create(&tenant_id, &Uuid::new_v4(), req).await.unwrap();
    }
}
