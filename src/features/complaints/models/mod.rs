pub mod complaint;
pub mod complaint_response;

pub use complaint::{Complaint, ComplaintPriority, ComplaintStatus};
pub use complaint_response::ComplaintResponseWithAuthor;
