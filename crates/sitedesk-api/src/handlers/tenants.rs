// ============================================================================
// SiteDesk API - Tenant Handlers
// File: crates/sitedesk-api/src/handlers/tenants.rs
// ============================================================================
//! Tenant administration endpoints. Listing and deactivation are Admin-only.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use sitedesk_core::domain::Tenant;

use crate::error::ApiFailure;
use crate::extract::AuthUser;
use crate::response::ApiResponse;
use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct TenantDto {
    pub id: Uuid,
    pub name: String,
    pub subscription_plan: String,
    pub max_users: i32,
    pub max_projects: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Tenant> for TenantDto {
    fn from(t: Tenant) -> Self {
        Self {
            id: t.id,
            name: t.name,
            subscription_plan: t.subscription_plan.as_str().to_string(),
            max_users: t.max_users,
            max_projects: t.max_projects,
            is_active: t.is_active,
            created_at: t.created_at,
        }
    }
}

/// GET /api/tenants (Admin only)
pub async fn list(
    State(state): State<SharedState>,
    caller: AuthUser,
) -> Result<Json<ApiResponse<Vec<TenantDto>>>, ApiFailure> {
    let tenants = state.tenants.list(caller.role).await?;
    Ok(Json(ApiResponse::success(
        tenants.into_iter().map(Into::into).collect(),
    )))
}

/// GET /api/tenants/{id}
pub async fn get(
    State(state): State<SharedState>,
    caller: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<TenantDto>>, ApiFailure> {
    let tenant = state
        .tenants
        .get(&id, caller.role, &caller.tenant_id)
        .await?
        .ok_or_else(ApiFailure::not_found)?;
    Ok(Json(ApiResponse::success(tenant.into())))
}

/// DELETE /api/tenants/{id} (Admin only, soft delete)
pub async fn deactivate(
    State(state): State<SharedState>,
    caller: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiFailure> {
    if state.tenants.deactivate(&id, caller.role).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiFailure::not_found())
    }
}
