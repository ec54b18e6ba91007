// ============================================================================
// SiteDesk Core - Quotation Entities
// File: crates/sitedesk-core/src/domain/quotation.rs
// Description: Quotation (BOQ) with line items and derived roll-up totals
// ============================================================================

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Quotation status. Transitions are deliberately unconstrained; any status
/// may be set by an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuotationStatus {
    Draft,
    Sent,
    Approved,
    Rejected,
}

impl QuotationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuotationStatus::Draft => "Draft",
            QuotationStatus::Sent => "Sent",
            QuotationStatus::Approved => "Approved",
            QuotationStatus::Rejected => "Rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Draft" => Some(QuotationStatus::Draft),
            "Sent" => Some(QuotationStatus::Sent),
            "Approved" => Some(QuotationStatus::Approved),
            "Rejected" => Some(QuotationStatus::Rejected),
            _ => None,
        }
    }
}

impl Default for QuotationStatus {
    fn default() -> Self {
        QuotationStatus::Draft
    }
}

/// Whether line-item amounts are taken from the payload or derived as
/// quantity * rate. The legacy system accepted caller-supplied amounts; this
/// is a deployment configuration choice, not something to decide silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountMode {
    CallerSupplied,
    DeriveFromRate,
}

impl AmountMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "caller" => Some(AmountMode::CallerSupplied),
            "derive" => Some(AmountMode::DeriveFromRate),
            _ => None,
        }
    }
}

impl Default for AmountMode {
    fn default() -> Self {
        AmountMode::CallerSupplied
    }
}

/// Round to two decimal places for currency, half away from zero.
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// The four derived monetary fields on a quotation. Always recomputed from
/// the full current item set and persisted together with the mutation that
/// invalidated them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotationTotals {
    pub sub_total: Decimal,
    pub tax_amount: Decimal,
    pub discount_amount: Decimal,
    pub grand_total: Decimal,
}

impl QuotationTotals {
    /// sub_total = sum of amounts; tax and discount are percentages of the
    /// subtotal rounded to currency precision; grand total is their sum.
    pub fn compute<I>(amounts: I, tax_pct: Decimal, discount_pct: Decimal) -> Self
    where
        I: IntoIterator<Item = Decimal>,
    {
        let hundred = Decimal::ONE_HUNDRED;
        let sub_total: Decimal = amounts.into_iter().sum();
        let tax_amount = round_currency(sub_total * tax_pct / hundred);
        let discount_amount = round_currency(sub_total * discount_pct / hundred);
        Self {
            sub_total,
            tax_amount,
            discount_amount,
            grand_total: sub_total + tax_amount - discount_amount,
        }
    }
}

/// Quotation (bill of quantities) header.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Quotation {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub project_id: Uuid,
    pub site_id: Option<Uuid>,

    /// Sequential per tenant, e.g. `QT-2026-0042`. Allocated from an atomic
    /// per-tenant counter inside the insert transaction.
    pub quotation_number: String,

    pub status: QuotationStatus,
    pub tax_pct: Decimal,
    pub discount_pct: Decimal,

    // Derived roll-up fields
    pub sub_total: Decimal,
    pub tax_amount: Decimal,
    pub discount_amount: Decimal,
    pub grand_total: Decimal,

    // Audit
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<Uuid>,
}

impl Quotation {
    pub fn new(
        tenant_id: Uuid,
        project_id: Uuid,
        site_id: Option<Uuid>,
        tax_pct: Decimal,
        discount_pct: Decimal,
        created_by: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            project_id,
            site_id,
            // Placeholder; the repository allocates the real number.
            quotation_number: String::new(),
            status: QuotationStatus::Draft,
            tax_pct,
            discount_pct,
            sub_total: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            grand_total: Decimal::ZERO,
            created_at: Utc::now(),
            created_by: Some(created_by),
            updated_at: None,
            updated_by: None,
        }
    }

    pub fn format_number(year: i32, sequence: i64) -> String {
        format!(
            "{}-{}-{:04}",
            sitedesk_shared::constants::QUOTATION_NUMBER_PREFIX,
            year,
            sequence
        )
    }

    pub fn apply_totals(&mut self, totals: QuotationTotals) {
        self.sub_total = totals.sub_total;
        self.tax_amount = totals.tax_amount;
        self.discount_amount = totals.discount_amount;
        self.grand_total = totals.grand_total;
    }

    pub fn touch(&mut self, user_id: Uuid) {
        self.updated_at = Some(Utc::now());
        self.updated_by = Some(user_id);
    }
}

/// Quotation line item. `amount` is stored as-is; whether it came from the
/// caller or from quantity * rate depends on the configured [`AmountMode`].
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QuotationItem {
    pub id: Uuid,
    pub quotation_id: Uuid,

    #[validate(length(min = 1, max = 500, message = "Item description is required"))]
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

    /// Display order within the quotation.
    pub sequence: i32,
}

impl QuotationItem {
    /// The amount to store given the configured mode.
    pub fn resolve_amount(mode: AmountMode, supplied: Decimal, quantity: Decimal, rate: Decimal) -> Decimal {
        match mode {
            AmountMode::CallerSupplied => supplied,
            AmountMode::DeriveFromRate => round_currency(quantity * rate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn totals_for_two_items_with_tax_and_discount() {
        let totals = QuotationTotals::compute([dec!(100), dec!(50)], dec!(18), dec!(10));
        assert_eq!(totals.sub_total, dec!(150));
        assert_eq!(totals.tax_amount, dec!(27.00));
        assert_eq!(totals.discount_amount, dec!(15.00));
        assert_eq!(totals.grand_total, dec!(162.00));
    }

    #[test]
    fn totals_after_removing_an_item() {
        // Same quotation as above with the 50 item removed.
        let totals = QuotationTotals::compute([dec!(100)], dec!(18), dec!(10));
        assert_eq!(totals.sub_total, dec!(100));
        assert_eq!(totals.tax_amount, dec!(18.00));
        assert_eq!(totals.discount_amount, dec!(10.00));
        assert_eq!(totals.grand_total, dec!(108.00));
    }

    #[test]
    fn totals_round_to_currency_precision() {
        // 33.33 * 7.5% = 2.49975 -> 2.50
        let totals = QuotationTotals::compute([dec!(33.33)], dec!(7.5), dec!(0));
        assert_eq!(totals.tax_amount, dec!(2.50));
        assert_eq!(totals.grand_total, dec!(35.83));
    }

    #[test]
    fn empty_item_set_yields_zero_totals() {
        let totals = QuotationTotals::compute(std::iter::empty(), dec!(18), dec!(10));
        assert_eq!(totals.sub_total, Decimal::ZERO);
        assert_eq!(totals.grand_total, Decimal::ZERO);
    }

    #[test]
    fn number_format_is_zero_padded() {
        assert_eq!(Quotation::format_number(2026, 7), "QT-2026-0007");
        assert_eq!(Quotation::format_number(2026, 12345), "QT-2026-12345");
    }

    #[test]
    fn amount_mode_selects_source() {
        let supplied = dec!(99);
        assert_eq!(
            QuotationItem::resolve_amount(AmountMode::CallerSupplied, supplied, dec!(2), dec!(40)),
            dec!(99)
        );
        assert_eq!(
            QuotationItem::resolve_amount(AmountMode::DeriveFromRate, supplied, dec!(2), dec!(40)),
            dec!(80.00)
        );
    }

    #[test]
    fn status_round_trips_and_has_no_transition_guard() {
        let mut q = Quotation::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            None,
            dec!(18),
            dec!(0),
            Uuid::new_v4(),
        );
        // Any status can follow any other.
        q.status = QuotationStatus::Approved;
        q.status = QuotationStatus::Draft;
        assert_eq!(QuotationStatus::from_str("Sent"), Some(QuotationStatus::Sent));
        assert_eq!(QuotationStatus::from_str("Void"), None);
    }
}
