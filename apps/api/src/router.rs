use std::sync::Arc;

use axum::{
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};

use appointment_cell::router::appointment_routes;
use auth_cell::router::auth_routes;
use chatbot_cell::router::chatbot_routes;
use doctor_cell::router::doctor_routes;
use payment_cell::router::payment_routes;
use service_cell::router::service_routes;
use shared_database::AppContext;

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now()
    }))
}

pub fn create_router(state: Arc<AppContext>) -> Router {
    Router::new()
        .route("/", get(|| async { "SmileCare API is running!" }))
        .route("/health", get(health))
        .nest("/api/auth", auth_routes(state.clone()))
        .nest("/api/services", service_routes(state.clone()))
        .nest("/api/doctors", doctor_routes(state.clone()))
        .nest("/api/appointments", appointment_routes(state.clone()))
        .nest("/api/payments", payment_routes(state.clone()))
        .nest("/api/chatbot", chatbot_routes(state))
}
