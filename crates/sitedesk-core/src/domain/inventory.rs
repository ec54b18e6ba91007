//! Inventory domain entities

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Stock movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    Receipt,
    Issue,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Receipt => "Receipt",
            TransactionType::Issue => "Issue",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Receipt" => Some(TransactionType::Receipt),
            "Issue" => Some(TransactionType::Issue),
            _ => None,
        }
    }

    /// Signed stock delta for a movement of `quantity`.
    pub fn delta(&self, quantity: Decimal) -> Decimal {
        match self {
            TransactionType::Receipt => quantity,
            TransactionType::Issue => -quantity,
        }
    }
}

/// Inventory item with current stock. `(tenant_id, code)` is unique.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InventoryItem {
    pub id: Uuid,
    pub tenant_id: Uuid,

    #[validate(length(min = 1, max = 200, message = "Item name is required"))]
    pub name: String,

    #[validate(length(min = 1, max = 50, message = "Item code is required"))]
    pub code: String,

    pub unit: Option<String>,
    pub stock_quantity: Decimal,

    // Audit
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<Uuid>,
}

impl InventoryItem {
    pub fn new(
        tenant_id: Uuid,
        name: String,
        code: String,
        unit: Option<String>,
        created_by: Uuid,
    ) -> Result<Self, validator::ValidationErrors> {
        let item = Self {
            id: Uuid::new_v4(),
            tenant_id,
            name: name.trim().to_string(),
            code: code.trim().to_uppercase(),
            unit,
            stock_quantity: Decimal::ZERO,
            created_at: Utc::now(),
            created_by: Some(created_by),
            updated_at: None,
            updated_by: None,
        };
        item.validate()?;
        Ok(item)
    }
}

/// Immutable ledger row recording one stock movement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockTransaction {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub item_id: Uuid,
    pub transaction_type: TransactionType,
    pub quantity: Decimal,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
}

impl StockTransaction {
    pub fn new(
        tenant_id: Uuid,
        item_id: Uuid,
        transaction_type: TransactionType,
        quantity: Decimal,
        created_by: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            item_id,
            transaction_type,
            quantity,
            created_at: Utc::now(),
            created_by: Some(created_by),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn issue_delta_is_negative() {
        assert_eq!(TransactionType::Issue.delta(dec!(5)), dec!(-5));
        assert_eq!(TransactionType::Receipt.delta(dec!(5)), dec!(5));
    }

    #[test]
    fn item_code_is_uppercased() {
        let item = InventoryItem::new(
            Uuid::new_v4(),
            "Cement 50kg".to_string(),
            "cem-50".to_string(),
            Some("bag".to_string()),
            Uuid::new_v4(),
        )
        .unwrap();
        assert_eq!(item.code, "CEM-50");
        assert_eq!(item.stock_quantity, Decimal::ZERO);
    }
}
