pub mod agency_dto;

pub use agency_dto::*;
