//! Complaint categories.
//!
//! Admins manage the full CRUD surface; agency staff may flip the active
//! flag. Categories referenced by at least one complaint cannot be
//! hard-deleted. The public active-only listing lives under the complaints
//! feature (`GET /api/complaints/categories`).

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::CategoryService;
