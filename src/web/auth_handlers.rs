// src/web/auth_handlers.rs
use crate::{
    error::AppResult,
    models::user::{LoginRequest, SignupRequest, TokenResponse},
    services::{auth_service, token_service},
    state::AppState,
    web::{mw_auth::BearerToken, response::ApiResponse},
};
use axum::{
    extract::{rejection::JsonRejection, Extension, Json, State},
    http::StatusCode,
};

// POST /api/v1/signup
pub async fn handle_signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> AppResult<ApiResponse<TokenResponse>> {
    let Json(req) = payload?;
    tracing::info!("Signup attempt for: {}", req.email);

    let user = auth_service::signup(&state.db_pool, &state.auth, &req.name, &req.email, &req.password).await?;
    let token = token_service::issue_token(&state.db_pool, &user.id, state.auth.token_ttl_hours).await?;

    Ok(ApiResponse::with_data(StatusCode::OK, "signup successful", TokenResponse { token }))
}

// POST /api/v1/login
pub async fn handle_login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<ApiResponse<TokenResponse>> {
    let Json(req) = payload?;

    let user = auth_service::validate_login(&state.db_pool, &req.email, &req.password).await?;
    let token = token_service::issue_token(&state.db_pool, &user.id, state.auth.token_ttl_hours).await?;

    Ok(ApiResponse::with_data(StatusCode::OK, "login successful", TokenResponse { token }))
}

// POST /api/v1/logout (authenticated)
pub async fn handle_logout(
    State(state): State<AppState>,
    Extension(BearerToken(token)): Extension<BearerToken>,
) -> AppResult<ApiResponse<()>> {
    token_service::revoke_token(&state.db_pool, &token).await?;
    tracing::info!("🚪 Token revoked.");
    Ok(ApiResponse::message(StatusCode::OK, "logged out"))
}
