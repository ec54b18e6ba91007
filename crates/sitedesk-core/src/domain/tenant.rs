// ============================================================================
// SiteDesk Core - Tenant Entity
// File: crates/sitedesk-core/src/domain/tenant.rs
// Description: Tenant (contractor company) with subscription limits
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Subscription plan enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionPlan {
    Free,
    Basic,
    Premium,
    Enterprise,
}

impl SubscriptionPlan {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionPlan::Free => "free",
            SubscriptionPlan::Basic => "basic",
            SubscriptionPlan::Premium => "premium",
            SubscriptionPlan::Enterprise => "enterprise",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "free" => Some(SubscriptionPlan::Free),
            "basic" => Some(SubscriptionPlan::Basic),
            "premium" => Some(SubscriptionPlan::Premium),
            "enterprise" => Some(SubscriptionPlan::Enterprise),
            _ => None,
        }
    }
}

impl Default for SubscriptionPlan {
    fn default() -> Self {
        SubscriptionPlan::Free
    }
}

/// Tenant entity. All business data is partitioned by `Tenant::id`; the row
/// itself is never hard-deleted while referenced, only deactivated.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Tenant {
    pub id: Uuid,

    #[validate(length(min = 2, max = 100, message = "Tenant name must be between 2 and 100 characters"))]
    pub name: String,

    pub subscription_plan: SubscriptionPlan,

    #[validate(range(min = 1, max = 10000, message = "Max users must be between 1 and 10000"))]
    pub max_users: i32,

    #[validate(range(min = 1, max = 10000, message = "Max projects must be between 1 and 10000"))]
    pub max_projects: i32,

    pub is_active: bool,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub modified_at: Option<DateTime<Utc>>,
    pub removed_at: Option<DateTime<Utc>>,
}

impl Tenant {
    pub fn new(name: String, plan: SubscriptionPlan) -> Result<Self, validator::ValidationErrors> {
        let (max_users, max_projects) = match plan {
            SubscriptionPlan::Free => (5, 3),
            SubscriptionPlan::Basic => (25, 25),
            SubscriptionPlan::Premium => (100, 200),
            SubscriptionPlan::Enterprise => (1000, 2000),
        };
        let tenant = Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            subscription_plan: plan,
            max_users,
            max_projects,
            is_active: true,
            created_at: Utc::now(),
            created_by: None,
            modified_at: None,
            removed_at: None,
        };
        tenant.validate()?;
        Ok(tenant)
    }

    pub fn soft_delete(&mut self) {
        self.is_active = false;
        self.removed_at = Some(Utc::now());
    }

    pub fn is_deleted(&self) -> bool {
        self.removed_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_free_tenant_is_active_with_free_limits() {
        let tenant = Tenant::new("Acme Builders".to_string(), SubscriptionPlan::Free).unwrap();
        assert!(tenant.is_active);
        assert_eq!(tenant.max_users, 5);
        assert_eq!(tenant.subscription_plan, SubscriptionPlan::Free);
    }

    #[test]
    fn short_name_is_rejected() {
        assert!(Tenant::new("A".to_string(), SubscriptionPlan::Free).is_err());
    }

    #[test]
    fn soft_delete_flips_active_flag() {
        let mut tenant = Tenant::new("Acme Builders".to_string(), SubscriptionPlan::Free).unwrap();
        tenant.soft_delete();
        assert!(!tenant.is_active);
        assert!(tenant.is_deleted());
    }
}
