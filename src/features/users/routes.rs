use std::sync::Arc;

use axum::{
    routing::{delete, get, patch},
    Router,
};

use crate::features::users::handlers;
use crate::features::users::services::UserService;

/// Admin user administration routes
pub fn routes(service: Arc<UserService>) -> Router {
    Router::new()
        .route("/api/users", get(handlers::list_users))
        .route("/api/users/{id}/role", patch(handlers::change_user_role))
        .route("/api/users/{id}/verify", patch(handlers::verify_user))
        .route("/api/users/{id}", delete(handlers::delete_user))
        .with_state(service)
}
