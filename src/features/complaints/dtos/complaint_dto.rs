use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::complaints::models::{
    Complaint, ComplaintPriority, ComplaintResponseWithAuthor, ComplaintStatus,
};

/// Request DTO for filing a complaint.
///
/// Status cannot be supplied: new complaints always start as `pending`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateComplaintDto {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 10000, message = "Description must be 1-10000 characters"))]
    pub description: String,

    pub category_id: Uuid,

    pub agency_id: Uuid,

    pub priority: Option<ComplaintPriority>,

    #[validate(length(max = 500, message = "Location must not exceed 500 characters"))]
    pub location: Option<String>,

    /// Opaque attachment references (upload handling is out of scope)
    #[validate(length(max = 10, message = "At most 10 attachments"))]
    pub attachments: Option<Vec<String>>,
}

/// Request DTO for updating a complaint
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateComplaintDto {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 10000, message = "Description must be 1-10000 characters"))]
    pub description: Option<String>,

    pub status: Option<ComplaintStatus>,

    pub priority: Option<ComplaintPriority>,

    /// Reassign to a different agency (must resolve to an existing record)
    pub agency_id: Option<Uuid>,

    #[validate(length(max = 500, message = "Location must not exceed 500 characters"))]
    pub location: Option<String>,
}

/// Request DTO for appending a response to a complaint
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RespondComplaintDto {
    #[validate(length(min = 1, max = 10000, message = "Response must be 1-10000 characters"))]
    pub response: String,

    /// When provided and different from the current status, the status is
    /// updated together with the response append.
    pub status: Option<ComplaintStatus>,
}

/// Status filter for the admin complaint listing; combined with the shared
/// pagination query in the handler.
#[derive(Debug, Clone, Deserialize, utoipa::IntoParams)]
pub struct ComplaintFilterQuery {
    #[serde(default)]
    pub status: Option<ComplaintStatus>,
}

/// Response DTO for complaint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintResponseDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub agency_id: Uuid,
    pub title: String,
    pub description: String,
    pub status: ComplaintStatus,
    pub priority: ComplaintPriority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub attachments: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Complaint> for ComplaintResponseDto {
    fn from(c: Complaint) -> Self {
        Self {
            id: c.id,
            user_id: c.user_id,
            category_id: c.category_id,
            agency_id: c.agency_id,
            title: c.title,
            description: c.description,
            status: c.status,
            priority: c.priority,
            location: c.location,
            attachments: c.attachments,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Response DTO for a single appended response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResponseItemDto {
    pub id: Uuid,
    pub responder_id: Uuid,
    pub responder_name: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<ComplaintResponseWithAuthor> for ResponseItemDto {
    fn from(r: ComplaintResponseWithAuthor) -> Self {
        Self {
            id: r.id,
            responder_id: r.responder_id,
            responder_name: r.responder_name,
            message: r.message,
            created_at: r.created_at,
        }
    }
}

/// Complaint with its ordered response thread
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintDetailDto {
    #[serde(flatten)]
    pub complaint: ComplaintResponseDto,
    pub responses: Vec<ResponseItemDto>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_dto_has_no_status_field() {
        // Creation always yields `pending`; a client-supplied status must be
        // rejected by deserialization of the known fields only.
        let json = serde_json::json!({
            "title": "Broken streetlight",
            "description": "Dark corner at 5th and Main",
            "categoryId": Uuid::new_v4(),
            "agencyId": Uuid::new_v4(),
            "status": "resolved"
        });
        let dto: CreateComplaintDto = serde_json::from_value(json).unwrap();
        assert_eq!(dto.title, "Broken streetlight");
        // No status field exists to carry the value through
    }

    #[test]
    fn respond_dto_status_is_optional() {
        let dto: RespondComplaintDto =
            serde_json::from_value(serde_json::json!({"response": "We are on it"})).unwrap();
        assert!(dto.status.is_none());

        let dto: RespondComplaintDto = serde_json::from_value(
            serde_json::json!({"response": "fixed", "status": "resolved"}),
        )
        .unwrap();
        assert_eq!(dto.status, Some(ComplaintStatus::Resolved));
    }
}
