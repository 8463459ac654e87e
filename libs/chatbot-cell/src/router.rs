use std::sync::Arc;

use axum::{routing::post, Router};

use shared_database::AppContext;

use crate::handlers;

pub fn chatbot_routes(state: Arc<AppContext>) -> Router {
    Router::new()
        .route("/chat", post(handlers::chat))
        .with_state(state)
}
