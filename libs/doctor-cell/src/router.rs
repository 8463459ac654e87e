use std::sync::Arc;

use axum::{routing::get, Router};

use shared_database::AppContext;

use crate::handlers;

pub fn doctor_routes(state: Arc<AppContext>) -> Router {
    Router::new()
        .route("/", get(handlers::get_doctors))
        .route("/{doctor_id}", get(handlers::get_doctor))
        .route("/{doctor_id}/availability", get(handlers::get_availability))
        .with_state(state)
}
