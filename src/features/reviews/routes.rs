use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::reviews::handlers;
use crate::features::reviews::services::ReviewService;

/// Public review routes (no authentication)
pub fn routes(service: Arc<ReviewService>) -> Router {
    Router::new()
        .route("/api/reviews/submit", post(handlers::create_review))
        .route("/api/reviews", get(handlers::list_reviews))
        .with_state(service)
}
