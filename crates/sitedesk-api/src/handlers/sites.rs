// ============================================================================
// SiteDesk API - Site Handlers
// File: crates/sitedesk-api/src/handlers/sites.rs
// ============================================================================
//! Site CRUD endpoints. Delete is a soft delete.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use sitedesk_core::domain::Site;
use sitedesk_core::services::{NewSite, SitePatch};

use crate::error::ApiFailure;
use crate::extract::AuthUser;
use crate::response::ApiResponse;
use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct SiteDto {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<Uuid>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Site> for SiteDto {
    fn from(s: Site) -> Self {
        Self {
            id: s.id,
            client_id: s.client_id,
            name: s.name,
            address: s.address,
            city: s.city,
            is_active: s.is_active,
            created_at: s.created_at,
        }
    }
}

/// GET /api/sites
pub async fn list(
    State(state): State<SharedState>,
    caller: AuthUser,
) -> Result<Json<ApiResponse<Vec<SiteDto>>>, ApiFailure> {
    let sites = state.sites.list(&caller.tenant_id).await?;
    Ok(Json(ApiResponse::success(
        sites.into_iter().map(Into::into).collect(),
    )))
}

/// GET /api/sites/{id}
pub async fn get(
    State(state): State<SharedState>,
    caller: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<SiteDto>>, ApiFailure> {
    let site = state
        .sites
        .get(&id, &caller.tenant_id)
        .await?
        .ok_or_else(ApiFailure::not_found)?;
    Ok(Json(ApiResponse::success(site.into())))
}

/// POST /api/sites
pub async fn create(
    State(state): State<SharedState>,
    caller: AuthUser,
    Json(payload): Json<NewSite>,
) -> Result<impl IntoResponse, ApiFailure> {
    let site = state
        .sites
        .create(&caller.tenant_id, &caller.user_id, payload)
        .await?;
    let location = format!("/api/sites/{}", site.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ApiResponse::success(SiteDto::from(site))),
    ))
}

/// PUT /api/sites/{id}
pub async fn update(
    State(state): State<SharedState>,
    caller: AuthUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<SitePatch>,
) -> Result<Json<ApiResponse<SiteDto>>, ApiFailure> {
    let site = state
        .sites
        .update(&id, &caller.tenant_id, &caller.user_id, patch)
        .await?
        .ok_or_else(ApiFailure::not_found)?;
    Ok(Json(ApiResponse::success(site.into())))
}

/// DELETE /api/sites/{id} (soft delete)
pub async fn delete(
    State(state): State<SharedState>,
    caller: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiFailure> {
    if state.sites.delete(&id, &caller.tenant_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiFailure::not_found())
    }
}
