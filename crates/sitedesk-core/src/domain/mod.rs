//! # SiteDesk Core - Domain Module
//!
//! Domain entities for the back-office.

pub mod client;
pub mod inventory;
pub mod quotation;
pub mod site;
pub mod tenant;
pub mod user;

// Re-export all entities and enums
pub use client::Client;
pub use inventory::{InventoryItem, StockTransaction, TransactionType};
pub use quotation::{
    AmountMode, Quotation, QuotationItem, QuotationStatus, QuotationTotals,
};
pub use site::Site;
pub use tenant::{SubscriptionPlan, Tenant};
pub use user::{User, UserRole};
