//! Site domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Construction site. Unlike most entities, sites are soft-deleted: removal
/// flips `is_active` and the row stays referenced by projects and quotations.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Site {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub client_id: Option<Uuid>,

    #[validate(length(min = 1, max = 200, message = "Site name is required"))]
    pub name: String,

    pub address: Option<String>,
    pub city: Option<String>,
    pub is_active: bool,

    // Audit
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<Uuid>,
}

impl Site {
    pub fn new(
        tenant_id: Uuid,
        name: String,
        client_id: Option<Uuid>,
        created_by: Uuid,
    ) -> Result<Self, validator::ValidationErrors> {
        let site = Self {
            id: Uuid::new_v4(),
            tenant_id,
            client_id,
            name: name.trim().to_string(),
            address: None,
            city: None,
            is_active: true,
            created_at: Utc::now(),
            created_by: Some(created_by),
            updated_at: None,
            updated_by: None,
        };
        site.validate()?;
        Ok(site)
    }

    pub fn soft_delete(&mut self) {
        self.is_active = false;
    }

    pub fn touch(&mut self, user_id: Uuid) {
        self.updated_at = Some(Utc::now());
        self.updated_by = Some(user_id);
    }
}
