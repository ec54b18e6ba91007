//! Repository traits (ports)
//!
//! Every method that touches tenant-owned data takes the caller's tenant id
//! and folds it into the lookup predicate. There is no way to address a
//! tenant-owned row by id alone, which makes the isolation invariant
//! structurally impossible to skip in the service layer.

pub mod client_repository;
pub mod inventory_repository;
pub mod quotation_repository;
pub mod site_repository;
pub mod tenant_repository;
pub mod user_repository;

pub use client_repository::ClientRepository;
pub use inventory_repository::InventoryRepository;
pub use quotation_repository::QuotationRepository;
pub use site_repository::SiteRepository;
pub use tenant_repository::TenantRepository;
pub use user_repository::UserRepository;
