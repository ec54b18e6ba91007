// ============================================================================
// SiteDesk API - Auth Handlers
// File: crates/sitedesk-api/src/handlers/auth.rs
// ============================================================================
//! Authentication HTTP handlers (login, register)

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sitedesk_shared::constants::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};

use crate::error::ApiFailure;
use crate::response::ApiResponse;
use crate::state::SharedState;

/// Login request payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Register request payload (company self-service signup)
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub company_name: String,
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// Authentication response
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user_id: Uuid,
    pub username: String,
    pub full_name: String,
    pub role: String,
    pub tenant_id: Uuid,
    pub tenant_name: String,
}

impl From<sitedesk_core::services::LoginResult> for AuthResponse {
    fn from(r: sitedesk_core::services::LoginResult) -> Self {
        Self {
            token: r.token,
            user_id: r.user_id,
            username: r.username,
            full_name: r.full_name,
            role: r.role.as_str().to_string(),
            tenant_id: r.tenant_id,
            tenant_name: r.tenant_name,
        }
    }
}

/// Login handler - POST /api/auth/login
pub async fn login(
    State(state): State<SharedState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiFailure> {
    if payload.username.is_empty() || payload.password.is_empty() {
        return Err(ApiFailure::bad_request(
            "VALIDATION_ERROR",
            "Username and password are required",
        ));
    }

    let result = state.auth.login(&payload.username, &payload.password).await?;
    Ok(Json(ApiResponse::success(result.into())))
}

/// Register handler - POST /api/auth/register
pub async fn register(
    State(state): State<SharedState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiFailure> {
    if payload.company_name.len() < 2 {
        return Err(ApiFailure::bad_request(
            "VALIDATION_ERROR",
            "Company name must be at least 2 characters",
        ));
    }
    if payload.email.is_empty() {
        return Err(ApiFailure::bad_request("VALIDATION_ERROR", "Email is required"));
    }
    if payload.password.len() < MIN_PASSWORD_LENGTH || payload.password.len() > MAX_PASSWORD_LENGTH {
        return Err(ApiFailure::bad_request(
            "VALIDATION_ERROR",
            "Password must be between 8 and 128 characters",
        ));
    }

    let result = state
        .auth
        .register(
            &payload.company_name,
            &payload.full_name,
            &payload.email,
            &payload.password,
        )
        .await?;
    Ok(Json(ApiResponse::success(result.into())))
}
