// ============================================================================
// SiteDesk API - Quotation Handlers
// File: crates/sitedesk-api/src/handlers/quotations.rs
// ============================================================================
//! Quotation endpoints, including the item sub-resource whose mutations
//! trigger the totals roll-up, and the advisory next-number preview.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use sitedesk_core::domain::{Quotation, QuotationItem};
use sitedesk_core::services::{
    NewQuotation, NewQuotationItem, QuotationHeaderPatch, QuotationItemPatch, QuotationWithItems,
};

use crate::error::ApiFailure;
use crate::extract::AuthUser;
use crate::response::ApiResponse;
use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct QuotationDto {
    pub id: Uuid,
    pub project_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_id: Option<Uuid>,
    pub quotation_number: String,
    pub status: String,
    pub tax_pct: Decimal,
    pub discount_pct: Decimal,
    pub sub_total: Decimal,
    pub tax_amount: Decimal,
    pub discount_amount: Decimal,
    pub grand_total: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<Quotation> for QuotationDto {
    fn from(q: Quotation) -> Self {
        Self {
            id: q.id,
            project_id: q.project_id,
            site_id: q.site_id,
            quotation_number: q.quotation_number,
            status: q.status.as_str().to_string(),
            tax_pct: q.tax_pct,
            discount_pct: q.discount_pct,
            sub_total: q.sub_total,
            tax_amount: q.tax_amount,
            discount_amount: q.discount_amount,
            grand_total: q.grand_total,
            created_at: q.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuotationItemDto {
    pub id: Uuid,
    pub quotation_id: Uuid,
    pub description: String,
    pub quantity: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub rate: Decimal,
    pub amount: Decimal,
    pub is_with_material: bool,
    pub sequence: i32,
}

impl From<QuotationItem> for QuotationItemDto {
    fn from(i: QuotationItem) -> Self {
        Self {
            id: i.id,
            quotation_id: i.quotation_id,
            description: i.description,
            quantity: i.quantity,
            width: i.width,
            length: i.length,
            height: i.height,
            area: i.area,
            unit: i.unit,
            rate: i.rate,
            amount: i.amount,
            is_with_material: i.is_with_material,
            sequence: i.sequence,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuotationWithItemsDto {
    #[serde(flatten)]
    pub quotation: QuotationDto,
    pub items: Vec<QuotationItemDto>,
}

impl From<QuotationWithItems> for QuotationWithItemsDto {
    fn from(q: QuotationWithItems) -> Self {
        Self {
            quotation: q.quotation.into(),
            items: q.items.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NextNumberDto {
    pub number: String,
}

/// GET /api/quotations
pub async fn list(
    State(state): State<SharedState>,
    caller: AuthUser,
) -> Result<Json<ApiResponse<Vec<QuotationDto>>>, ApiFailure> {
    let quotations = state.quotations.list(&caller.tenant_id).await?;
    Ok(Json(ApiResponse::success(
        quotations.into_iter().map(Into::into).collect(),
    )))
}

/// GET /api/quotations/next-number
///
/// Advisory preview only; a concurrent create may take this number first.
pub async fn next_number(
    State(state): State<SharedState>,
    caller: AuthUser,
) -> Result<Json<ApiResponse<NextNumberDto>>, ApiFailure> {
    let number = state.quotations.next_number(&caller.tenant_id).await?;
    Ok(Json(ApiResponse::success(NextNumberDto { number })))
}

/// GET /api/quotations/{id}
pub async fn get(
    State(state): State<SharedState>,
    caller: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<QuotationWithItemsDto>>, ApiFailure> {
    let quotation = state
        .quotations
        .get(&id, &caller.tenant_id)
        .await?
        .ok_or_else(ApiFailure::not_found)?;
    Ok(Json(ApiResponse::success(quotation.into())))
}

/// POST /api/quotations
pub async fn create(
    State(state): State<SharedState>,
    caller: AuthUser,
    Json(payload): Json<NewQuotation>,
) -> Result<impl IntoResponse, ApiFailure> {
    let created = state
        .quotations
        .create(&caller.tenant_id, &caller.user_id, payload)
        .await?;
    let location = format!("/api/quotations/{}", created.quotation.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ApiResponse::success(QuotationWithItemsDto::from(created))),
    ))
}

/// PUT /api/quotations/{id}
pub async fn update(
    State(state): State<SharedState>,
    caller: AuthUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<QuotationHeaderPatch>,
) -> Result<Json<ApiResponse<QuotationDto>>, ApiFailure> {
    let quotation = state
        .quotations
        .update(&id, &caller.tenant_id, &caller.user_id, patch)
        .await?
        .ok_or_else(ApiFailure::not_found)?;
    Ok(Json(ApiResponse::success(quotation.into())))
}

/// DELETE /api/quotations/{id}
pub async fn delete(
    State(state): State<SharedState>,
    caller: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiFailure> {
    if state.quotations.delete(&id, &caller.tenant_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiFailure::not_found())
    }
}

/// POST /api/quotations/{id}/items
pub async fn add_item(
    State(state): State<SharedState>,
    caller: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<NewQuotationItem>,
) -> Result<impl IntoResponse, ApiFailure> {
    let item = state
        .quotations
        .add_item(&id, &caller.tenant_id, payload)
        .await?
        .ok_or_else(ApiFailure::not_found)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(QuotationItemDto::from(item))),
    ))
}

/// PUT /api/quotations/items/{item_id}
pub async fn update_item(
    State(state): State<SharedState>,
    caller: AuthUser,
    Path(item_id): Path<Uuid>,
    Json(patch): Json<QuotationItemPatch>,
) -> Result<Json<ApiResponse<QuotationItemDto>>, ApiFailure> {
    let item = state
        .quotations
        .update_item(&item_id, &caller.tenant_id, patch)
        .await?
        .ok_or_else(ApiFailure::not_found)?;
    Ok(Json(ApiResponse::success(item.into())))
}

/// DELETE /api/quotations/items/{item_id}
pub async fn delete_item(
    State(state): State<SharedState>,
    caller: AuthUser,
    Path(item_id): Path<Uuid>,
) -> Result<StatusCode, ApiFailure> {
    if state
        .quotations
        .remove_item(&item_id, &caller.tenant_id)
        .await?
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiFailure::not_found())
    }
}
