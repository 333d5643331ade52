use std::sync::Arc;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::features::agencies::services::AgencyService;
use crate::features::categories::services::CategoryService;
use crate::features::complaints::handlers;
use crate::features::complaints::services::ComplaintService;

/// Public lookups backing the complaint submission form
pub fn public_routes(
    category_service: Arc<CategoryService>,
    agency_service: Arc<AgencyService>,
) -> Router {
    let categories = Router::new()
        .route(
            "/api/complaints/categories",
            get(handlers::list_form_categories),
        )
        .with_state(category_service);

    let agencies = Router::new()
        .route(
            "/api/complaints/agencies",
            get(handlers::list_form_agencies),
        )
        .with_state(agency_service);

    categories.merge(agencies)
}

/// Authenticated complaint routes
pub fn protected_routes(service: Arc<ComplaintService>) -> Router {
    Router::new()
        .route("/api/complaints", post(handlers::create_complaint))
        .route(
            "/api/complaints/my-complaints",
            get(handlers::list_my_complaints),
        )
        .route("/api/complaints/all", get(handlers::list_all_complaints))
        .route(
            "/api/complaints/agency",
            get(handlers::list_agency_complaints),
        )
        .route("/api/complaints/{id}", get(handlers::get_complaint))
        .route("/api/complaints/{id}", patch(handlers::update_complaint))
        .route("/api/complaints/{id}", delete(handlers::delete_complaint))
        .route(
            "/api/complaints/{id}/respond",
            post(handlers::respond_to_complaint),
        )
        .with_state(service)
}
