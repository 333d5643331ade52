pub mod agencies;
pub mod auth;
pub mod categories;
pub mod complaints;
pub mod dashboard;
pub mod reviews;
pub mod users;
