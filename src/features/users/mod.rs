//! Admin user administration.
//!
//! Listing, role changes, manual email verification, and account removal.
//! All routes require an admin token; self-targeting operations are refused.

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::UserService;
