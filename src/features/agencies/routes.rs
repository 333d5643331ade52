use std::sync::Arc;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::features::agencies::handlers;
use crate::features::agencies::services::AgencyService;

/// Protected agency management routes (admin only)
pub fn routes(service: Arc<AgencyService>) -> Router {
    Router::new()
        .route("/api/agencies", get(handlers::list_agencies))
        .route("/api/agencies", post(handlers::create_agency))
        .route("/api/agencies/{id}", patch(handlers::update_agency))
        .route("/api/agencies/{id}/toggle", patch(handlers::toggle_agency))
        .route("/api/agencies/{id}", delete(handlers::delete_agency))
        .route("/api/agencies/{id}/staff", get(handlers::list_staff))
        .route("/api/agencies/{id}/staff", post(handlers::assign_staff))
        .route(
            "/api/agencies/{id}/staff/{user_id}",
            delete(handlers::remove_staff),
        )
        .with_state(service)
}
