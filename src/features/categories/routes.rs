use std::sync::Arc;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Protected category management routes (admin, plus staff toggle)
pub fn routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route("/api/categories", get(handlers::list_categories))
        .route("/api/categories", post(handlers::create_category))
        .route("/api/categories/{id}", patch(handlers::update_category))
        .route(
            "/api/categories/{id}/toggle",
            patch(handlers::toggle_category),
        )
        .route("/api/categories/{id}", delete(handlers::delete_category))
        .with_state(service)
}
