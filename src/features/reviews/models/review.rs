use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a public service review
#[derive(Debug, Clone, FromRow)]
pub struct Review {
    pub id: Uuid,
    pub name: String,
    pub comment: String,
    pub rating: i32,
    pub is_visible: bool,
    pub created_at: DateTime<Utc>,
}
