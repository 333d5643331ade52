use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Complaint status enum matching the `complaint_status` database enum.
///
/// Any status may be set at any time by an authorized caller; there is
/// deliberately no transition graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "complaint_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    Pending,
    InProgress,
    Resolved,
    Rejected,
}

impl std::fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComplaintStatus::Pending => write!(f, "pending"),
            ComplaintStatus::InProgress => write!(f, "in_progress"),
            ComplaintStatus::Resolved => write!(f, "resolved"),
            ComplaintStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Complaint priority enum matching the `complaint_priority` database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "complaint_priority", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ComplaintPriority {
    Low,
    Medium,
    High,
}

/// Database model for complaint
#[derive(Debug, Clone, FromRow)]
pub struct Complaint {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub agency_id: Uuid,
    pub title: String,
    pub description: String,
    pub status: ComplaintStatus,
    pub priority: ComplaintPriority,
    pub location: Option<String>,
    pub attachments: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ComplaintStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
    }

    #[test]
    fn status_display_matches_wire_format() {
        assert_eq!(ComplaintStatus::InProgress.to_string(), "in_progress");
        assert_eq!(ComplaintStatus::Pending.to_string(), "pending");
    }
}
