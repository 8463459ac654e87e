use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    Json,
};
use serde_json::{json, Value};

use shared_database::AppContext;
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{ConfirmPaymentRequest, CreateIntentRequest, CreateIntentResponse};
use crate::services::payment::PaymentService;

#[axum::debug_handler]
pub async fn create_payment_intent(
    State(ctx): State<Arc<AppContext>>,
    Extension(user): Extension<User>,
    Json(request): Json<CreateIntentRequest>,
) -> Result<Json<CreateIntentResponse>, AppError> {
    let payments = PaymentService::new(&ctx);
    let response = payments
        .create_intent(&request.appointment_id.to_string(), &user)
        .await?;
    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn confirm_payment(
    State(ctx): State<Arc<AppContext>>,
    Extension(_user): Extension<User>,
    Json(request): Json<ConfirmPaymentRequest>,
) -> Result<Json<Value>, AppError> {
    let payments = PaymentService::new(&ctx);
    let payment = payments.confirm(&request.payment_intent_id).await?;
    Ok(Json(json!({
        "message": "Payment confirmed",
        "payment": payment
    })))
}
