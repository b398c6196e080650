// ============================
// crates/backend-lib/src/handlers/auth.rs
// ============================
//! Login and refresh endpoints.
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use weather_common::{LoginRequest, LoginResponse, RefreshRequest, RefreshResponse};

use crate::error::AppError;
use crate::AppState;

/// `POST /login`
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(credentials) = payload?;
    let pair = state
        .auth
        .login(&credentials.username, &credentials.password)
        .await?;

    Ok(Json(LoginResponse {
        access_token: pair.access_token.token,
        refresh_token: pair.refresh_token,
    }))
}

/// `POST /refresh`
pub async fn refresh(
    State(state): State<AppState>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<Json<RefreshResponse>, AppError> {
    let Json(request) = payload?;
    let access_token = state.auth.refresh(&request.refresh_token).await?;
    Ok(Json(RefreshResponse {
        access_token: access_token.token,
    }))
}
