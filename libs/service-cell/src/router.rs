use std::sync::Arc;

use axum::{routing::get, Router};

use shared_database::AppContext;

use crate::handlers;

pub fn service_routes(state: Arc<AppContext>) -> Router {
    Router::new()
        .route("/", get(handlers::get_services))
        .route("/{service_id}", get(handlers::get_service))
        .with_state(state)
}
