//! Government agencies and their staff assignments.
//!
//! Assigning a user to an agency promotes them to `agency_staff`; removing
//! them resets the role to citizen and clears the reference, so the
//! role/agency invariant never breaks. Deleting an agency detaches all staff
//! inside the same transaction and is refused while complaints reference it.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::AgencyService;
