//! Application state: services wired to their PostgreSQL repositories.

use std::sync::Arc;

use sqlx::PgPool;

use sitedesk_core::domain::AmountMode;
use sitedesk_core::services::{
    AuthService, ClientService, InventoryService, QuotationService, SiteService, TenantService,
};
use sitedesk_infrastructure::database::postgres::{
    PgClientRepository, PgInventoryRepository, PgQuotationRepository, PgSiteRepository,
    PgTenantRepository, PgUserRepository,
};
use sitedesk_shared::config::AppConfig;

pub struct AppState {
    pub auth: AuthService<PgUserRepository, PgTenantRepository>,
    pub tenants: TenantService<PgTenantRepository>,
    pub clients: ClientService<PgClientRepository>,
    pub sites: SiteService<PgSiteRepository>,
    pub quotations: QuotationService<PgQuotationRepository>,
    pub inventory: InventoryService<PgInventoryRepository>,
    pub config: AppConfig,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(pool: PgPool, config: AppConfig) -> SharedState {
        let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
        let tenant_repo = Arc::new(PgTenantRepository::new(pool.clone()));
        let client_repo = Arc::new(PgClientRepository::new(pool.clone()));
        let site_repo = Arc::new(PgSiteRepository::new(pool.clone()));
        let quotation_repo = Arc::new(PgQuotationRepository::new(pool.clone()));
        let inventory_repo = Arc::new(PgInventoryRepository::new(pool));

        let amount_mode =
            AmountMode::from_str(&config.quotation.amount_mode).unwrap_or_default();

        Arc::new(Self {
            auth: AuthService::new(
                user_repo,
                tenant_repo.clone(),
                config.jwt.secret.clone(),
                config.jwt.token_expiry,
            ),
            tenants: TenantService::new(tenant_repo),
            clients: ClientService::new(client_repo),
            sites: SiteService::new(site_repo),
            quotations: QuotationService::new(quotation_repo, amount_mode),
            inventory: InventoryService::new(inventory_repo),
            config,
        })
    }
}
