use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use shared_database::StoreError;
use shared_models::error::AppError;

/// Row in the `services` table. Price is in major currency units; the payment
/// bridge converts to minor units when talking to the processor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub duration_minutes: i32,
    pub category: Option<String>,
    pub is_active: bool,
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Service not found")]
    NotFound,

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound => AppError::NotFound("Service not found".to_string()),
            CatalogError::Store(e) => AppError::Database(e.to_string()),
        }
    }
}
