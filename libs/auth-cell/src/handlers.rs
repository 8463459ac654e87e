use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    Json,
};

use shared_database::AppContext;
use shared_models::auth::{Account, AuthResponse, LoginRequest, RegisterRequest, User};
use shared_models::error::AppError;

use crate::services::account::AccountService;

#[axum::debug_handler]
pub async fn register(
    State(ctx): State<Arc<AppContext>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let accounts = AccountService::new(&ctx);
    let response = accounts.register(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[axum::debug_handler]
pub async fn login(
    State(ctx): State<Arc<AppContext>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let accounts = AccountService::new(&ctx);
    let response = accounts.login(request).await?;
    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn get_profile(
    State(ctx): State<Arc<AppContext>>,
    Extension(user): Extension<User>,
) -> Result<Json<Account>, AppError> {
    let accounts = AccountService::new(&ctx);
    let account = accounts.profile(&user.id).await?;
    Ok(Json(account))
}
