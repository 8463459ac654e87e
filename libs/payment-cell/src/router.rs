use std::sync::Arc;

use axum::{middleware, routing::post, Router};

use shared_database::AppContext;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn payment_routes(state: Arc<AppContext>) -> Router {
    Router::new()
        .route("/create-intent", post(handlers::create_payment_intent))
        .route("/confirm", post(handlers::confirm_payment))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}
