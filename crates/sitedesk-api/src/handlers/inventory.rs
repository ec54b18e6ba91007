// ============================================================================
// SiteDesk API - Inventory Handlers
// File: crates/sitedesk-api/src/handlers/inventory.rs
// ============================================================================
//! Inventory item endpoints plus the stock transaction endpoint. An Issue
//! beyond current stock is rejected with 400 and no ledger row is written.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sitedesk_core::domain::{InventoryItem, StockTransaction, TransactionType};
use sitedesk_core::services::NewInventoryItem;

use crate::error::ApiFailure;
use crate::extract::AuthUser;
use crate::response::ApiResponse;
use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct InventoryItemDto {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub stock_quantity: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<InventoryItem> for InventoryItemDto {
    fn from(i: InventoryItem) -> Self {
        Self {
            id: i.id,
            name: i.name,
            code: i.code,
            unit: i.unit,
            stock_quantity: i.stock_quantity,
            created_at: i.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NewStockTransaction {
    pub item_id: Uuid,
    pub transaction_type: String,
    pub quantity: Decimal,
}

#[derive(Debug, Serialize)]
pub struct StockTransactionDto {
    pub id: Uuid,
    pub item_id: Uuid,
    pub transaction_type: String,
    pub quantity: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<StockTransaction> for StockTransactionDto {
    fn from(t: StockTransaction) -> Self {
        Self {
            id: t.id,
            item_id: t.item_id,
            transaction_type: t.transaction_type.as_str().to_string(),
            quantity: t.quantity,
            created_at: t.created_at,
        }
    }
}

/// GET /api/inventory/items
pub async fn list_items(
    State(state): State<SharedState>,
    caller: AuthUser,
) -> Result<Json<ApiResponse<Vec<InventoryItemDto>>>, ApiFailure> {
    let items = state.inventory.list_items(&caller.tenant_id).await?;
    Ok(Json(ApiResponse::success(
        items.into_iter().map(Into::into).collect(),
    )))
}

/// GET /api/inventory/items/{id}
pub async fn get_item(
    State(state): State<SharedState>,
    caller: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<InventoryItemDto>>, ApiFailure> {
    let item = state
        .inventory
        .get_item(&id, &caller.tenant_id)
        .await?
        .ok_or_else(ApiFailure::not_found)?;
    Ok(Json(ApiResponse::success(item.into())))
}

/// POST /api/inventory/items
pub async fn create_item(
    State(state): State<SharedState>,
    caller: AuthUser,
    Json(payload): Json<NewInventoryItem>,
) -> Result<impl IntoResponse, ApiFailure> {
    let item = state
        .inventory
        .create_item(&caller.tenant_id, &caller.user_id, payload)
        .await?;
    let location = format!("/api/inventory/items/{}", item.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ApiResponse::success(InventoryItemDto::from(item))),
    ))
}

/// POST /api/inventory/transactions
pub async fn create_transaction(
    State(state): State<SharedState>,
    caller: AuthUser,
    Json(payload): Json<NewStockTransaction>,
) -> Result<impl IntoResponse, ApiFailure> {
    let transaction_type = TransactionType::from_str(&payload.transaction_type).ok_or_else(|| {
        ApiFailure::bad_request(
            "VALIDATION_ERROR",
            "transaction_type must be 'Receipt' or 'Issue'",
        )
    })?;

    let applied = state
        .inventory
        .process_transaction(
            &payload.item_id,
            &caller.tenant_id,
            &caller.user_id,
            transaction_type,
            payload.quantity,
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(StockTransactionDto::from(applied))),
    ))
}
