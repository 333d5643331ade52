use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Response row joined with the responder's display name, for detail views.
/// Rows are immutable once written.
#[derive(Debug, Clone, FromRow)]
pub struct ComplaintResponseWithAuthor {
    pub id: Uuid,
    pub complaint_id: Uuid,
    pub responder_id: Uuid,
    pub responder_name: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
