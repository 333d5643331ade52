//! Public service reviews.
//!
//! Anonymous submission with a 1-5 rating; the public feed returns the ten
//! most recent visible reviews. Visibility moderation happens directly in
//! the database for now.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ReviewService;
