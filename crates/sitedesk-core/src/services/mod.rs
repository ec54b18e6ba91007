//! Domain services

pub mod auth_service;
pub mod client_service;
pub mod inventory_service;
pub mod quotation_service;
pub mod site_service;
pub mod tenant_service;

pub use auth_service::{AuthService, LoginResult};
pub use client_service::{ClientService, ClientPatch, NewClient};
pub use inventory_service::{InventoryService, NewInventoryItem};
pub use quotation_service::{
    NewQuotation, NewQuotationItem, QuotationHeaderPatch, QuotationItemPatch, QuotationService,
    QuotationWithItems,
};
pub use site_service::{NewSite, SitePatch, SiteService};
pub use tenant_service::TenantService;
