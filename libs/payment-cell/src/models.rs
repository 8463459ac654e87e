use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use shared_database::StoreError;
use shared_models::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    Pending,
    Completed,
}

/// Row in the `payments` table. Amount is in major currency units; the
/// processor is the only place that sees cents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub appointment_id: Uuid,
    pub user_id: String,
    pub amount: f64,
    pub currency: String,
    pub status: PaymentStatus,
    pub payment_method: Option<String>,
    pub stripe_payment_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateIntentRequest {
    pub appointment_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct ConfirmPaymentRequest {
    pub payment_intent_id: String,
}

#[derive(Debug, Serialize)]
pub struct CreateIntentResponse {
    pub client_secret: String,
    pub amount: i64,
}

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("Appointment not found")]
    AppointmentNotFound,

    #[error("Payment not found")]
    PaymentNotFound,

    #[error("Payment not completed")]
    NotCompleted,

    #[error("payment processor error: {0}")]
    Processor(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::AppointmentNotFound => {
                AppError::NotFound("Appointment not found".to_string())
            }
            PaymentError::PaymentNotFound => AppError::NotFound("Payment not found".to_string()),
            PaymentError::NotCompleted => AppError::BadRequest("Payment not completed".to_string()),
            PaymentError::Processor(msg) => AppError::ExternalService(msg),
            PaymentError::Store(e) => AppError::Database(e.to_string()),
        }
    }
}
