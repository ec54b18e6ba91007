// ============================================================================
// SiteDesk API - Client Handlers
// File: crates/sitedesk-api/src/handlers/clients.rs
// ============================================================================
//! Client CRUD endpoints; the template every generic entity slice follows.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use sitedesk_core::domain::Client;
use sitedesk_core::services::{ClientPatch, NewClient};

use crate::error::ApiFailure;
use crate::extract::AuthUser;
use crate::response::ApiResponse;
use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct ClientDto {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gst_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Client> for ClientDto {
    fn from(c: Client) -> Self {
        Self {
            id: c.id,
            name: c.name,
            contact_person: c.contact_person,
            email: c.email,
            phone: c.phone,
            address: c.address,
            gst_number: c.gst_number,
            created_at: c.created_at,
        }
    }
}

/// GET /api/clients
pub async fn list(
    State(state): State<SharedState>,
    caller: AuthUser,
) -> Result<Json<ApiResponse<Vec<ClientDto>>>, ApiFailure> {
    let clients = state.clients.list(&caller.tenant_id).await?;
    Ok(Json(ApiResponse::success(
        clients.into_iter().map(Into::into).collect(),
    )))
}

/// GET /api/clients/{id}
pub async fn get(
    State(state): State<SharedState>,
    caller: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ClientDto>>, ApiFailure> {
    let client = state
        .clients
        .get(&id, &caller.tenant_id)
        .await?
        .ok_or_else(ApiFailure::not_found)?;
    Ok(Json(ApiResponse::success(client.into())))
}

/// POST /api/clients
pub async fn create(
    State(state): State<SharedState>,
    caller: AuthUser,
    Json(payload): Json<NewClient>,
) -> Result<impl IntoResponse, ApiFailure> {
    let client = state
        .clients
        .create(&caller.tenant_id, &caller.user_id, payload)
        .await?;
    let location = format!("/api/clients/{}", client.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ApiResponse::success(ClientDto::from(client))),
    ))
}

/// PUT /api/clients/{id}
pub async fn update(
    State(state): State<SharedState>,
    caller: AuthUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<ClientPatch>,
) -> Result<Json<ApiResponse<ClientDto>>, ApiFailure> {
    let client = state
        .clients
        .update(&id, &caller.tenant_id, &caller.user_id, patch)
        .await?
        .ok_or_else(ApiFailure::not_found)?;
    Ok(Json(ApiResponse::success(client.into())))
}

/// DELETE /api/clients/{id}
pub async fn delete(
    State(state): State<SharedState>,
    caller: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiFailure> {
    if state.clients.delete(&id, &caller.tenant_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiFailure::not_found())
    }
}
