use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use shared_database::AppContext;
use shared_models::error::AppError;

use crate::models::Service;
use crate::services::catalog::CatalogService;

#[axum::debug_handler]
pub async fn get_services(
    State(ctx): State<Arc<AppContext>>,
) -> Result<Json<Vec<Service>>, AppError> {
    let catalog = CatalogService::new(&ctx.store);
    let services = catalog.list_active().await?;
    Ok(Json(services))
}

#[axum::debug_handler]
pub async fn get_service(
    State(ctx): State<Arc<AppContext>>,
    Path(service_id): Path<String>,
) -> Result<Json<Service>, AppError> {
    let catalog = CatalogService::new(&ctx.store);
    let service = catalog.get(&service_id).await?;
    Ok(Json(service))
}
