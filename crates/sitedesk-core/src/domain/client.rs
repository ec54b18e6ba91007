//! Client domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Client (customer of the contractor). Representative of the generic
/// tenant-owned CRUD entities; hard-deleted on removal.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Client {
    pub id: Uuid,
    pub tenant_id: Uuid,

    #[validate(length(min = 1, max = 200, message = "Client name is required"))]
    pub name: String,

    pub contact_person: Option<String>,

    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub gst_number: Option<String>,

    // Audit
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<Uuid>,
}

impl Client {
    pub fn new(
        tenant_id: Uuid,
        name: String,
        created_by: Uuid,
    ) -> Result<Self, validator::ValidationErrors> {
        let client = Self {
            id: Uuid::new_v4(),
            tenant_id,
            name: name.trim().to_string(),
            contact_person: None,
            email: None,
            phone: None,
            address: None,
            gst_number: None,
            created_at: Utc::now(),
            created_by: Some(created_by),
            updated_at: None,
            updated_by: None,
        };
        client.validate()?;
        Ok(client)
    }

    pub fn touch(&mut self, user_id: Uuid) {
        self.updated_at = Some(Utc::now());
        self.updated_by = Some(user_id);
    }
}
