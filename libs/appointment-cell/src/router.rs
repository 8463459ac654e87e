use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};

use shared_database::AppContext;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn appointment_routes(state: Arc<AppContext>) -> Router {
    let public_routes = Router::new()
        .route("/", post(handlers::create_appointment))
        .route("/", get(handlers::get_appointments))
        .route("/{appointment_id}", get(handlers::get_appointment))
        .route("/{appointment_id}", patch(handlers::update_appointment_status))
        .route("/{appointment_id}", delete(handlers::delete_appointment));

    let protected_routes = Router::new()
        .route("/my", get(handlers::get_my_appointments))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
