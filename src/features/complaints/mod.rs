//! Complaint lifecycle.
//!
//! | Method | Path                          | Access                         |
//! |--------|-------------------------------|--------------------------------|
//! | GET    | /api/complaints/categories    | Public                         |
//! | GET    | /api/complaints/agencies      | Public                         |
//! | POST   | /api/complaints               | Any authenticated user         |
//! | GET    | /api/complaints/my-complaints | Any authenticated user         |
//! | GET    | /api/complaints/all           | Admin                          |
//! | GET    | /api/complaints/agency        | Agency staff (with agency)     |
//! | GET    | /api/complaints/{id}          | Owner, assigned staff, admin   |
//! | PATCH  | /api/complaints/{id}          | Owner, assigned staff, admin   |
//! | DELETE | /api/complaints/{id}          | Owner, assigned staff, admin   |
//! | POST   | /api/complaints/{id}/respond  | Assigned staff, admin          |
//!
//! New complaints always start `pending`. Visibility failures on GET come
//! back as 404 rather than 403.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ComplaintService;
