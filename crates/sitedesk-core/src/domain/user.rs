// ============================================================================
// SiteDesk Core - User Entity
// File: crates/sitedesk-core/src/domain/user.rs
// Description: User belonging to exactly one tenant, with a fixed role
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Role enumeration. Role-gated endpoints check membership in an allow-list;
/// there is no permission hierarchy beyond that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Admin,
    ProjectManager,
    SiteSupervisor,
    Accountant,
    Worker,
    Subcontractor,
    Vendor,
    Consultant,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "Admin",
            UserRole::ProjectManager => "ProjectManager",
            UserRole::SiteSupervisor => "SiteSupervisor",
            UserRole::Accountant => "Accountant",
            UserRole::Worker => "Worker",
            UserRole::Subcontractor => "Subcontractor",
            UserRole::Vendor => "Vendor",
            UserRole::Consultant => "Consultant",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Admin" => Some(UserRole::Admin),
            "ProjectManager" => Some(UserRole::ProjectManager),
            "SiteSupervisor" => Some(UserRole::SiteSupervisor),
            "Accountant" => Some(UserRole::Accountant),
            "Worker" => Some(UserRole::Worker),
            "Subcontractor" => Some(UserRole::Subcontractor),
            "Vendor" => Some(UserRole::Vendor),
            "Consultant" => Some(UserRole::Consultant),
            _ => None,
        }
    }
}

/// User entity. `(tenant_id, username)` and `(tenant_id, email)` are unique.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct User {
    pub id: Uuid,
    pub tenant_id: Uuid,

    #[validate(length(min = 2, max = 100, message = "Username must be between 2 and 100 characters"))]
    pub username: String,

    #[validate(email)]
    pub email: String,

    pub full_name: String,

    #[serde(skip_serializing)]
    pub password_hash: String,

    pub role: UserRole,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(
        tenant_id: Uuid,
        username: String,
        email: String,
        full_name: String,
        password_hash: String,
        role: UserRole,
    ) -> Result<Self, validator::ValidationErrors> {
        let user = Self {
            id: Uuid::new_v4(),
            tenant_id,
            username: username.trim().to_string(),
            email: email.trim().to_lowercase(),
            full_name: full_name.trim().to_string(),
            password_hash,
            role,
            is_active: true,
            last_login_at: None,
            created_at: Utc::now(),
            modified_at: None,
        };
        user.validate()?;
        Ok(user)
    }

    pub fn can_login(&self) -> bool {
        self.is_active
    }

    pub fn record_login(&mut self) {
        self.last_login_at = Some(Utc::now());
    }
}
