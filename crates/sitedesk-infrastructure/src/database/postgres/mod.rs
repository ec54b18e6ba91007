//! PostgreSQL repository implementations

pub mod client_repo_impl;
pub mod inventory_repo_impl;
pub mod quotation_repo_impl;
pub mod site_repo_impl;
pub mod tenant_repo_impl;
pub mod user_repo_impl;

pub use client_repo_impl::PgClientRepository;
pub use inventory_repo_impl::PgInventoryRepository;
pub use quotation_repo_impl::PgQuotationRepository;
pub use site_repo_impl::PgSiteRepository;
pub use tenant_repo_impl::PgTenantRepository;
pub use user_repo_impl::PgUserRepository;

use sitedesk_core::error::DomainError;

/// Map a sqlx error, turning unique-constraint violations into a duplicate
/// error naming `key`.
pub(crate) fn map_db_error(e: sqlx::Error, key: &str) -> DomainError {
    let msg = e.to_string();
    if msg.contains("unique") || msg.contains("duplicate") {
        DomainError::DuplicateKey(key.to_string())
    } else {
        DomainError::DatabaseError(msg)
    }
}
