pub mod complaint_dto;

pub use complaint_dto::*;
